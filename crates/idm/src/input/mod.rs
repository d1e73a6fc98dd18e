//! Source data loading.

mod loader;
mod source;

pub use loader::{is_null_value, Loader};
pub use source::{SourceMetadata, SourceVillage};
