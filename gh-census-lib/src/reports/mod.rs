//! Rendering of question answers.
//!
//! Two generators are provided, each accessed through a `generate` function writing to
//! any [`core::fmt::Write`]:
//! - **Console**: one `N. title: answer` line per question, optionally colored
//! - **JSON**: machine-readable `{"answers": [...]}` document

mod console;
mod json;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
