//! # docpages
//!
//! Renders reStructuredText pages for an API documentation tree: one page per
//! package, with a heading, an optional inline `automodule` block, and a
//! `toctree` linking to the package's children.
//!
//! ```
//! use docpages::{PackageNode, PageRenderer, RenderContext};
//!
//! let renderer = PageRenderer::new(RenderContext::new("pwncat"));
//! let node = PackageNode::new("pwncat.modules").submodules(["pwncat.modules.enumerate"]);
//! let page = renderer.render(&node).unwrap();
//! assert!(page.starts_with("pwncat.modules package\n"));
//! ```

pub mod error;
pub mod parser;
pub mod renderer;
pub mod writer;

pub use error::{Error, InvalidInput, Result};
pub use parser::{Manifest, ManifestParser, Options, PackageNode};
pub use renderer::{PageRenderer, Render, RenderContext, RenderedPage};
pub use writer::{PageWriter, WriteOutcome};

#[cfg(test)]
mod tests;
