//! Test doubles shared by unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_lite::future::Boxed;

use crate::core::search::{MediaKind, RawResult};
use crate::error::{EncoreError, EncoreResult};
use crate::executor::PlayerControl;
use crate::platform::{Help, Navigation, Platform, Playback, Settings};
use crate::services::gateway::SearchGateway;

/// Gateway that answers every query with one track titled after the
/// query, records the queries it saw, and can be slowed down per query.
#[derive(Clone, Default)]
pub struct ScriptedGateway {
    calls: Arc<Mutex<Vec<String>>>,
    latencies: HashMap<String, Duration>,
    fail: bool,
}

impl ScriptedGateway {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_latency(mut self, query: &str, latency: Duration) -> Self {
        self.latencies.insert(query.to_string(), latency);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl SearchGateway for ScriptedGateway {
    fn search(&self, query: &str) -> Boxed<EncoreResult<Vec<RawResult>>> {
        self.calls.lock().unwrap().push(query.to_string());

        let latency = self.latencies.get(query).copied().unwrap_or_default();
        let fail = self.fail;
        let query = query.to_string();

        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            if fail {
                return Err(EncoreError::Gateway("503 Service Unavailable".to_string()));
            }
            Ok(vec![RawResult {
                id: format!("t-{}", query),
                kind: MediaKind::Track,
                title: query,
                subtitle: "Test Artist".to_string(),
                image: None,
                related: false,
                payload: serde_json::Value::Null,
            }])
        })
    }
}

/// Collaborator that records every call as a short string.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl Recorder {
    /// A recorder whose collaborators report failure after recording.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn platform(&self) -> Platform {
        Platform {
            playback: Box::new(self.clone()),
            navigation: Box::new(self.clone()),
            settings: Box::new(self.clone()),
            help: Box::new(self.clone()),
        }
    }

    fn push(&self, call: String) -> EncoreResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err(EncoreError::Playback("collaborator offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Playback for Recorder {
    fn play_track(&self, track: &RawResult) -> EncoreResult<()> {
        self.push(format!("play:{}", track.id))
    }

    fn control(&self, control: PlayerControl) -> EncoreResult<()> {
        self.push(format!("control:{:?}", control))
    }
}

impl Navigation for Recorder {
    fn navigate_to(&self, kind: MediaKind, id: &str) -> EncoreResult<()> {
        self.push(format!("navigate:{:?}:{}", kind, id))
    }

    fn open_route(&self, route: &str) -> EncoreResult<()> {
        self.push(format!("route:{}", route))
    }
}

impl Settings for Recorder {
    fn toggle(&self, key: &str) -> EncoreResult<()> {
        self.push(format!("toggle:{}", key))
    }
}

impl Help for Recorder {
    fn show(&self, topic: &str) -> EncoreResult<()> {
        self.push(format!("help:{}", topic))
    }
}
