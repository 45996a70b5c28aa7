pub mod error;
pub mod fs;
pub mod noop;
pub mod ports;

pub use error::{MemoryError, MemoryErrorKind};
pub use fs::FsChainStore;
pub use noop::{FixedMemoryIndex, NoopChainStore, NoopMemoryIndex};
pub use ports::{ChainStorePort, MemoryHit, MemoryIndexPort};
