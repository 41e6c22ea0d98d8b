// Theme Generator Models
// Data structures shared by the conversion pipeline

mod settings;
mod style;
mod theme;
mod theme_document;

pub use settings::*;
pub use style::*;
pub use theme::*;
pub use theme_document::*;
