pub mod catalog;
pub mod gateway;
pub mod recents;

pub use catalog::CommandCatalog;
pub use gateway::{FixtureGateway, SearchGateway};
pub use recents::{JsonFileBackend, MemoryBackend, RecencyEntry, RecencyStore, RecentsBackend};
