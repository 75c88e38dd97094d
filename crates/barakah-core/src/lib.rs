pub mod analytics;
pub mod api;
pub mod chat;
pub mod config;
pub mod content;
pub mod error;
pub mod prayer;
pub mod product;
pub mod restaurant;
pub mod settings;
pub mod storage;
pub mod stream;
pub mod user;

// Re-export common error type
pub use error::{BarakahError, Result};
