use std::io::Read;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{InvalidInput, Result};
use crate::parser::types::*;
use crate::renderer::RenderContext;

/// Location label used for errors in the manifest's top-level fields.
const MANIFEST: &str = "manifest";

/// Location label used for errors in the global `options` object.
const OPTIONS: &str = "options";

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Validate every package and resolve it against the global options.
    /// Either all packages are valid or none are returned.
    pub fn nodes(&self) -> Result<Vec<PackageNode>> {
        ManifestParser::new(self).parse_packages()
    }

    /// The explicit root package, falling back to the first package listed.
    pub fn root_package(&self) -> Option<&str> {
        self.root_package.as_str().or_else(|| {
            self.packages
                .get(0)
                .and_then(|package| package.get("name"))
                .and_then(Value::as_str)
        })
    }

    pub fn set_root_package(&mut self, name: impl Into<String>) {
        self.root_package = Value::String(name.into());
    }

    /// Replace one global option. A missing `options` object is created; an
    /// ill-typed one is left alone so the parser still rejects it.
    pub fn set_option(&mut self, field: &str, value: impl Into<Value>) {
        if self.options.is_null() {
            self.options = Value::Object(Map::new());
        }
        if let Some(options) = self.options.as_object_mut() {
            options.insert(field.to_string(), value.into());
        }
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(self.root_package().unwrap_or_default())
    }
}

// Converts untyped manifest fields into validated options and nodes
pub struct ManifestParser<'a> {
    manifest: &'a Manifest,
}

impl<'a> ManifestParser<'a> {
    pub fn new(manifest: &'a Manifest) -> Self {
        Self { manifest }
    }

    pub fn parse_options(&self) -> std::result::Result<Options, InvalidInput> {
        let value = &self.manifest.options;
        if value.is_null() {
            return Ok(Options::default());
        }
        if !value.is_object() {
            return Err(InvalidInput::WrongType {
                package: OPTIONS.to_string(),
                field: "options",
            });
        }

        let defaults = Options::default();
        Ok(Options {
            module_first: bool_field(value, OPTIONS, "module_first")?
                .unwrap_or(defaults.module_first),
            automodule_options: string_list(value, OPTIONS, "automodule_options")?
                .unwrap_or(defaults.automodule_options),
            max_depth: depth_field(value, OPTIONS)?.unwrap_or(defaults.max_depth),
        })
    }

    pub fn parse_packages(&self) -> Result<Vec<PackageNode>> {
        match &self.manifest.root_package {
            Value::Null | Value::String(_) => {}
            _ => {
                return Err(InvalidInput::WrongType {
                    package: MANIFEST.to_string(),
                    field: "root_package",
                }
                .into())
            }
        }

        let packages = match &self.manifest.packages {
            Value::Null => return Err(InvalidInput::NoPackages.into()),
            Value::Array(packages) if packages.is_empty() => {
                return Err(InvalidInput::NoPackages.into())
            }
            Value::Array(packages) => packages,
            _ => {
                return Err(InvalidInput::WrongType {
                    package: MANIFEST.to_string(),
                    field: "packages",
                }
                .into())
            }
        };

        let options = self.parse_options()?;

        let nodes = packages
            .iter()
            .enumerate()
            .map(|(index, value)| self.parse_package(index, value, &options))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(count = nodes.len(), "resolved package nodes");
        Ok(nodes)
    }

    fn parse_package(
        &self,
        index: usize,
        value: &Value,
        options: &Options,
    ) -> std::result::Result<PackageNode, InvalidInput> {
        if !value.is_object() {
            return Err(InvalidInput::WrongType {
                package: format!("packages[{}]", index),
                field: "package",
            });
        }

        let name = match value.get("name") {
            None | Some(Value::Null) => return Err(InvalidInput::EmptyName),
            Some(Value::String(name)) if name.is_empty() => return Err(InvalidInput::EmptyName),
            Some(Value::String(name)) => name.clone(),
            Some(_) => {
                return Err(InvalidInput::WrongType {
                    package: format!("packages[{}]", index),
                    field: "name",
                })
            }
        };

        let node = PackageNode {
            is_namespace: bool_field(value, &name, "is_namespace")?.unwrap_or(false),
            module_first: bool_field(value, &name, "module_first")?
                .unwrap_or(options.module_first),
            automodule_options: string_list(value, &name, "automodule_options")?
                .unwrap_or_else(|| options.automodule_options.clone()),
            submodules: string_list(value, &name, "submodules")?.unwrap_or_default(),
            subpackages: string_list(value, &name, "subpackages")?.unwrap_or_default(),
            max_depth: depth_field(value, &name)?.unwrap_or(options.max_depth),
            name,
        };

        node.validate()?;
        Ok(node)
    }
}

fn bool_field(
    value: &Value,
    package: &str,
    field: &'static str,
) -> std::result::Result<Option<bool>, InvalidInput> {
    match value.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(_) => Err(InvalidInput::WrongType {
            package: package.to_string(),
            field,
        }),
    }
}

fn string_list(
    value: &Value,
    package: &str,
    field: &'static str,
) -> std::result::Result<Option<Vec<String>>, InvalidInput> {
    let entries = match value.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(InvalidInput::WrongType {
                package: package.to_string(),
                field,
            })
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::String(s) if s.is_empty() => Err(InvalidInput::EmptyEntry {
                package: package.to_string(),
                field,
                index,
            }),
            Value::String(s) => Ok(s.clone()),
            _ => Err(InvalidInput::NonStringEntry {
                package: package.to_string(),
                field,
                index,
            }),
        })
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(Some)
}

fn depth_field(value: &Value, package: &str) -> std::result::Result<Option<u32>, InvalidInput> {
    match value.get("max_depth") {
        None | Some(Value::Null) => Ok(None),
        Some(depth) => match depth.as_i64() {
            Some(depth) => depth_from_i64(depth, package).map(Some),
            None => Err(InvalidInput::WrongType {
                package: package.to_string(),
                field: "max_depth",
            }),
        },
    }
}

fn depth_from_i64(depth: i64, package: &str) -> std::result::Result<u32, InvalidInput> {
    if depth < 0 {
        return Err(InvalidInput::NegativeDepth(depth));
    }
    u32::try_from(depth).map_err(|_| InvalidInput::WrongType {
        package: package.to_string(),
        field: "max_depth",
    })
}
