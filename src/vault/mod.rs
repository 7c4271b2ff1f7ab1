//! Vault model: entries, path helpers, and the file store collaborator

mod entry;
pub mod path;
mod store;

pub use entry::{Entry, File, Folder};
pub use store::{FileStore, Vault};
