use crate::parser::*;
use crate::renderer::components::*;
use crate::renderer::traits::*;

/// Title of the section linking to child pages.
pub const CHILDREN_TITLE: &str = "Modules and Packages";

/// Page title chosen for a package node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heading {
    Root,
    Namespace(String),
    Package(String),
}

impl Heading {
    /// The root check wins over the namespace flag.
    pub fn for_node(node: &PackageNode, context: &RenderContext) -> Self {
        if context.is_root(&node.name) {
            Heading::Root
        } else if node.is_namespace {
            Heading::Namespace(node.name.clone())
        } else {
            Heading::Package(node.name.clone())
        }
    }

    /// Unescaped title text.
    pub fn text(&self) -> String {
        match self {
            Heading::Root => ROOT_TITLE.to_string(),
            Heading::Namespace(name) => format!("{} namespace", name),
            Heading::Package(name) => format!("{} package", name),
        }
    }
}

impl Render for Heading {
    fn render(&self, _context: &RenderContext) -> String {
        let escaped = RstEscaper.escape(&self.text());
        HeadingRenderer.render_heading(&escaped, 1)
    }
}

/// `automodule` directive for a module, one flag line per option.
#[derive(Debug, Clone, Copy)]
pub struct AutomoduleBlock<'a> {
    pub module: &'a str,
    pub options: &'a [String],
}

impl<'a> AutomoduleBlock<'a> {
    pub fn new(module: &'a str, options: &'a [String]) -> Self {
        Self { module, options }
    }
}

impl Render for AutomoduleBlock<'_> {
    fn render(&self, _context: &RenderContext) -> String {
        let directive = DirectiveRenderer;
        let mut output = directive.render_directive("automodule", Some(self.module));
        for option in self.options {
            output.push_str(&directive.render_flag(option));
        }
        output
    }
}

/// `toctree` directive listing child documents verbatim.
#[derive(Debug, Clone)]
pub struct TocTree<'a> {
    pub max_depth: u32,
    pub entries: Vec<&'a str>,
}

impl<'a> TocTree<'a> {
    pub fn new(max_depth: u32, entries: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            max_depth,
            entries: entries.into_iter().collect(),
        }
    }

    /// Children of a node in navigation order.
    pub fn for_node(node: &'a PackageNode) -> Self {
        Self::new(node.max_depth, node.children())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Render for TocTree<'_> {
    fn render(&self, _context: &RenderContext) -> String {
        let directive = DirectiveRenderer;
        let mut output = directive.render_directive("toctree", None);
        output.push_str(&directive.render_option("maxdepth", &self.max_depth.to_string()));
        output.push('\n');
        for entry in &self.entries {
            output.push_str(&directive.render_content_line(entry));
        }
        output
    }
}

/// The "Modules and Packages" section: a level-2 title followed by the toctree.
/// Renders nothing when there are no children.
#[derive(Debug, Clone)]
pub struct ChildrenSection<'a> {
    pub toctree: TocTree<'a>,
}

impl<'a> ChildrenSection<'a> {
    pub fn for_node(node: &'a PackageNode) -> Self {
        Self {
            toctree: TocTree::for_node(node),
        }
    }
}

impl Render for ChildrenSection<'_> {
    fn render(&self, context: &RenderContext) -> String {
        if self.toctree.is_empty() {
            return String::new();
        }

        let mut output = HeadingRenderer.render_heading(CHILDREN_TITLE, 2);
        output.push('\n');
        output.push_str(&self.toctree.render(context));
        output
    }
}
