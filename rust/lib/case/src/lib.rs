pub mod case;
pub mod defaults;
pub mod env;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use case::CaseDirectory;
pub use env::FoamEnv;
pub use error::CaseError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::CaseStore;
