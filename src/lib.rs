// CodeMirror Theme Generator
// Converts packaged VS Code color themes into CodeMirror themes

pub mod error;
pub mod models;
pub mod services;

pub use error::{ConvertError, Result};
