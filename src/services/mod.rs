// Theme Generator Services
// Conversion pipeline: load, parse, resolve, render

mod catalog;
mod events;
mod generator;
mod jsonc;
mod scope_resolver;
mod template_renderer;
mod theme_loader;
mod theme_parser;

pub use catalog::*;
pub use events::*;
pub use generator::*;
pub use jsonc::{strip_jsonc_comments, strip_trailing_commas, to_strict_json};
pub use scope_resolver::*;
pub use template_renderer::*;
pub use theme_loader::*;
pub use theme_parser::*;
