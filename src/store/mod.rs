//! Record store backends that need no external infrastructure.

pub mod memory;

pub use memory::MemoryRecordStore;
