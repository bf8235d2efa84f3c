//! Encore - Keyboard-driven command palette for music browsing.
//!
//! Encore merges remote catalog results (tracks, albums, artists,
//! playlists), built-in commands and a persisted list of recently used
//! items into one keyboard-navigable list.
//!
//! # Architecture
//!
//! The library is organized into these main modules:
//!
//! - [`config`] - Configuration loading and management
//! - [`core`] - Result types and the classifier
//! - [`controller`] - Debounced, generation-tagged query handling
//! - [`selection`] - Keyboard selection over the flat list
//! - [`executor`] - Activation of a selected result
//! - [`platform`] - Playback, navigation, settings and help collaborators
//! - [`services`] - Command catalog, search gateway and recents store
//! - [`palette`] - The state holder tying everything together
//!
//! # Example
//!
//! ```ignore
//! use encore::{Config, FixtureGateway, Palette, PaletteCommand, Platform, RecencyStore};
//!
//! let config = Config::load();
//! let gateway = FixtureGateway::from_file("catalog.json".as_ref())?;
//! let recents = RecencyStore::in_memory(config.recents.capacity);
//! let mut palette = Palette::new(&config, Arc::new(gateway), Platform::logging(), recents);
//!
//! palette.open();
//! palette.on_query_change("arctic");
//! palette.pump().await;
//! palette.handle(PaletteCommand::Confirm);
//! ```

// Public modules
pub mod config;
pub mod controller;
pub mod core;
pub mod executor;
pub mod palette;
pub mod platform;
pub mod selection;
pub mod services;

// Internal modules
mod error;
mod search;

#[cfg(test)]
mod testing;

// Re-export commonly used types for convenience
pub use config::Config;
pub use controller::{ApplyOutcome, QueryController, SearchResponse};
pub use core::search::{ResultBuckets, SearchEngine, SearchResult};
pub use error::{EncoreError, EncoreResult};
pub use executor::{Activation, ActivationDispatcher, ExecutionAction};
pub use palette::{Palette, PaletteCommand, PaletteSignal, ViewState};
pub use platform::Platform;
pub use selection::{SelectionModel, SelectionState};
pub use services::{
    CommandCatalog, FixtureGateway, JsonFileBackend, MemoryBackend, RecencyEntry, RecencyStore,
    RecentsBackend, SearchGateway,
};
