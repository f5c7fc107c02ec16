//! Stylesheet handling for installed packages.
//!
//! Two steps make a package's styles safe to load next to every other
//! installed package:
//!
//! - the entry stylesheet, if any, is compiled to `diamond/dist/main.css`
//!   through a [`StylesheetCompiler`];
//! - every `.scss`/`.sass` partial is rewritten so each class selector and
//!   `@extend` target carries a per-package prefix ([`rewrite_selectors`]).

pub mod compiler;
pub mod error;
pub mod namespace;
pub mod pipeline;

pub use compiler::{CompileOptions, OutputStyle, SassCompiler, StylesheetCompiler};
pub use error::{Error, Result};
pub use namespace::{namespace_token, rewrite_selectors, selector_prefix};
pub use pipeline::{PipelineReport, StylesheetPipeline, namespace_partials};
