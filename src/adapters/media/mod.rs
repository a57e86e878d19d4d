//! Media storage adapters.
//!
//! - `LocalMediaStorage` - Uploaded files on the local filesystem, served under `/media`

mod local_file_storage;

pub use local_file_storage::LocalMediaStorage;
