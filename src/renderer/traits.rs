/// Title used for the page of the distinguished root package.
pub const ROOT_TITLE: &str = "API Documentation";

/// Configuration context for rendering operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub root_package: String,
}

impl RenderContext {
    pub fn new(root_package: impl Into<String>) -> Self {
        Self {
            root_package: root_package.into(),
        }
    }

    pub fn is_root(&self, name: &str) -> bool {
        !self.root_package.is_empty() && self.root_package == name
    }
}

/// Core rendering trait for every page fragment
pub trait Render {
    fn render(&self, context: &RenderContext) -> String;
}
