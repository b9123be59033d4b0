use serde::Deserialize;

use crate::error::InvalidInput;

/// Automodule flags used when neither the manifest nor the command line names any.
pub const DEFAULT_AUTOMODULE_OPTIONS: [&str; 3] =
    ["members", "undoc-members", "show-inheritance"];

pub const DEFAULT_MAX_DEPTH: u32 = 4;

/// Raw manifest as read from JSON. Every field stays untyped until the parser
/// checks it, so a bad value is reported as invalid input rather than a serde
/// error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub root_package: serde_json::Value,
    #[serde(default)]
    pub options: serde_json::Value,
    #[serde(default)]
    pub packages: serde_json::Value,
}

/// Tree-wide rendering options, resolved from the manifest's `options` object.
/// Each package may override them individually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub module_first: bool,
    pub automodule_options: Vec<String>,
    pub max_depth: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            module_first: false,
            automodule_options: DEFAULT_AUTOMODULE_OPTIONS
                .iter()
                .map(|opt| opt.to_string())
                .collect(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// One package or module page to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageNode {
    pub name: String,
    pub is_namespace: bool,
    pub module_first: bool,
    pub automodule_options: Vec<String>,
    pub submodules: Vec<String>,
    pub subpackages: Vec<String>,
    pub max_depth: u32,
}

impl PackageNode {
    /// A regular package with no children and default options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_namespace: false,
            module_first: false,
            automodule_options: DEFAULT_AUTOMODULE_OPTIONS
                .iter()
                .map(|opt| opt.to_string())
                .collect(),
            submodules: Vec::new(),
            subpackages: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn namespace(mut self, is_namespace: bool) -> Self {
        self.is_namespace = is_namespace;
        self
    }

    pub fn module_first(mut self, module_first: bool) -> Self {
        self.module_first = module_first;
        self
    }

    pub fn automodule_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.automodule_options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn submodules<I, S>(mut self, submodules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.submodules = submodules.into_iter().map(Into::into).collect();
        self
    }

    pub fn subpackages<I, S>(mut self, subpackages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subpackages = subpackages.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Child pages in navigation order: subpackages first, then submodules.
    pub fn children(&self) -> impl Iterator<Item = &str> {
        self.subpackages
            .iter()
            .chain(self.submodules.iter())
            .map(String::as_str)
    }

    pub fn has_children(&self) -> bool {
        !self.subpackages.is_empty() || !self.submodules.is_empty()
    }

    /// Whether the automodule block belongs on this page.
    pub fn renders_module_inline(&self) -> bool {
        self.module_first && !self.is_namespace
    }

    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.name.is_empty() {
            return Err(InvalidInput::EmptyName);
        }

        let sequences = [
            ("automodule_options", &self.automodule_options),
            ("subpackages", &self.subpackages),
            ("submodules", &self.submodules),
        ];
        for (field, entries) in sequences {
            if let Some(index) = entries.iter().position(|entry| entry.is_empty()) {
                return Err(InvalidInput::EmptyEntry {
                    package: self.name.clone(),
                    field,
                    index,
                });
            }
        }

        Ok(())
    }
}
