pub mod config_loader;
pub mod memory;
pub mod paths;
pub mod storage;

pub use config_loader::ConfigLoader;
pub use memory::{MemoryStorage, MemoryTokenStore};
pub use paths::BarakahPaths;
pub use storage::{FileKeyValueStorage, FileTokenStore};
