//! Asset source adapters.

pub mod in_memory;
pub mod manifest;

pub use in_memory::InMemoryAssetSource;
pub use manifest::ManifestAssetSource;
