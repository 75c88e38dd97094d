//! On-device storage implementations.

pub mod json_kv;
pub mod token_store;

pub use json_kv::FileKeyValueStorage;
pub use token_store::FileTokenStore;
