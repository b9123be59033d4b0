use tracing::{debug, trace};

use crate::error::Result;
use crate::parser::*;
use crate::renderer::renders::*;
use crate::renderer::traits::*;

/// A rendered page and the package it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub name: String,
    pub contents: String,
}

/// Renders one reST page per package node. Holds no mutable state, so a
/// single renderer can be shared across threads.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    context: RenderContext,
}

impl PageRenderer {
    pub fn new(context: RenderContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Render the page for `node`. Invalid nodes produce an error and no text.
    pub fn render(&self, node: &PackageNode) -> Result<String> {
        node.validate()?;

        let mut sections = Vec::with_capacity(3);

        let heading = Heading::for_node(node, &self.context);
        trace!(package = %node.name, ?heading, "selected heading");
        sections.push(heading.render(&self.context));

        if node.renders_module_inline() {
            let block = AutomoduleBlock::new(&node.name, &node.automodule_options);
            sections.push(block.render(&self.context));
        }

        if node.has_children() {
            sections.push(ChildrenSection::for_node(node).render(&self.context));
        }

        // Every section ends with a newline, so joining on one more leaves a
        // single blank line between them.
        Ok(sections.join("\n"))
    }

    /// Render every node, or fail on the first invalid one without returning
    /// any pages.
    pub fn render_all(&self, nodes: &[PackageNode]) -> Result<Vec<RenderedPage>> {
        let pages = nodes
            .iter()
            .map(|node| {
                Ok(RenderedPage {
                    name: node.name.clone(),
                    contents: self.render(node)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(count = pages.len(), "rendered pages");
        Ok(pages)
    }
}
