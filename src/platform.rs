//! Capabilities the palette needs from the surrounding application.
//!
//! The host supplies one implementation of each at construction time.

use crate::core::search::{MediaKind, RawResult};
use crate::error::EncoreResult;
use crate::executor::PlayerControl;

/// Audio playback
pub trait Playback: Send + Sync {
    fn play_track(&self, track: &RawResult) -> EncoreResult<()>;
    fn control(&self, control: PlayerControl) -> EncoreResult<()>;
}

/// Client-side routing
pub trait Navigation: Send + Sync {
    /// Open the detail page of a catalog entity
    fn navigate_to(&self, kind: MediaKind, id: &str) -> EncoreResult<()>;
    /// Open a named application route (home, library, settings, ...)
    fn open_route(&self, route: &str) -> EncoreResult<()>;
}

/// Toggle user preferences
pub trait Settings: Send + Sync {
    fn toggle(&self, key: &str) -> EncoreResult<()>;
}

/// Show help panels
pub trait Help: Send + Sync {
    fn show(&self, topic: &str) -> EncoreResult<()>;
}

/// Aggregate struct holding all collaborator implementations
pub struct Platform {
    pub playback: Box<dyn Playback>,
    pub navigation: Box<dyn Navigation>,
    pub settings: Box<dyn Settings>,
    pub help: Box<dyn Help>,
}

impl Platform {
    /// Collaborators that only log what they were asked to do.
    pub fn logging() -> Self {
        Self {
            playback: Box::new(LoggingCollaborator),
            navigation: Box::new(LoggingCollaborator),
            settings: Box::new(LoggingCollaborator),
            help: Box::new(LoggingCollaborator),
        }
    }
}

struct LoggingCollaborator;

impl Playback for LoggingCollaborator {
    fn play_track(&self, track: &RawResult) -> EncoreResult<()> {
        tracing::info!(id = %track.id, title = %track.title, "play track");
        Ok(())
    }

    fn control(&self, control: PlayerControl) -> EncoreResult<()> {
        tracing::info!(?control, "player control");
        Ok(())
    }
}

impl Navigation for LoggingCollaborator {
    fn navigate_to(&self, kind: MediaKind, id: &str) -> EncoreResult<()> {
        tracing::info!(?kind, %id, "navigate");
        Ok(())
    }

    fn open_route(&self, route: &str) -> EncoreResult<()> {
        tracing::info!(%route, "open route");
        Ok(())
    }
}

impl Settings for LoggingCollaborator {
    fn toggle(&self, key: &str) -> EncoreResult<()> {
        tracing::info!(%key, "toggle setting");
        Ok(())
    }
}

impl Help for LoggingCollaborator {
    fn show(&self, topic: &str) -> EncoreResult<()> {
        tracing::info!(%topic, "show help");
        Ok(())
    }
}
