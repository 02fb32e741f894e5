pub mod bits;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod logger;
pub mod memory;
pub mod rng;
pub mod translation;
pub mod vm_manager;

// Re-export commonly used items for convenience
pub use config::AddressSpaceConfig;
pub use constants::*;
pub use error::{Result, VmError};
pub use memory::{init_page_table, PageTable, PageTableEntry};
pub use rng::{FrameSource, RandomFrames, ScriptedFrames};
pub use translation::{translate, Translation, VirtualAddress};
pub use vm_manager::VmManager;
