pub mod error;
pub mod identity;
pub mod note;
pub mod policy;
pub mod store;

pub use error::{NoteError, Result};
