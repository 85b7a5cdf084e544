//! Document splitting and `List` unwrapping.

pub mod list;
pub mod yaml;

pub use list::unwrap_list;
pub use yaml::{Document, split_documents};
