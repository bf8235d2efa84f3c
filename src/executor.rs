//! Result execution module - determines what action to take for each SearchResult
//! and hands it to the right collaborator.

use crate::core::search::{MediaKind, RawResult, ResultData, SearchResult};
use crate::platform::Platform;
use crate::services::recents::RecencyStore;

/// The action to perform when a result is activated
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionAction {
    /// Start playback of a track
    PlayTrack(RawResult),

    /// Open the page of an album, artist or playlist
    Navigate { kind: MediaKind, id: String },

    /// Run a built-in command
    Command(CommandAction),

    /// Command whose action tag nothing handles
    Unknown { action: String },
}

/// Built-in command actions, parsed from `namespace:argument` tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    /// `nav:<route>`
    OpenRoute(String),
    /// `player:<control>`
    Player(PlayerControl),
    /// `settings:<key>`
    ToggleSetting(String),
    /// `help:<topic>`
    ShowHelp(String),
}

/// Transport controls exposed as commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerControl {
    TogglePlayback,
    Next,
    Previous,
    Shuffle,
    Repeat,
}

impl PlayerControl {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "toggle" => Some(PlayerControl::TogglePlayback),
            "next" => Some(PlayerControl::Next),
            "previous" => Some(PlayerControl::Previous),
            "shuffle" => Some(PlayerControl::Shuffle),
            "repeat" => Some(PlayerControl::Repeat),
            _ => None,
        }
    }
}

/// Parse a command action tag into a CommandAction.
pub fn parse_command_action(tag: &str) -> Option<CommandAction> {
    let (namespace, argument) = tag.split_once(':')?;
    if argument.is_empty() {
        return None;
    }

    match namespace {
        "nav" => Some(CommandAction::OpenRoute(argument.to_string())),
        "player" => PlayerControl::parse(argument).map(CommandAction::Player),
        "settings" => Some(CommandAction::ToggleSetting(argument.to_string())),
        "help" => Some(CommandAction::ShowHelp(argument.to_string())),
        _ => None,
    }
}

impl SearchResult {
    /// Get the action to perform for this result.
    pub fn execution_action(&self) -> ExecutionAction {
        match &self.data {
            ResultData::Media(raw) => match raw.kind {
                MediaKind::Track => ExecutionAction::PlayTrack(raw.clone()),
                kind => ExecutionAction::Navigate {
                    kind,
                    id: raw.id.clone(),
                },
            },
            ResultData::Command(data) => match parse_command_action(&data.action) {
                Some(action) => ExecutionAction::Command(action),
                None => ExecutionAction::Unknown {
                    action: data.action.clone(),
                },
            },
        }
    }

    /// Whether activating this result should be remembered.
    fn is_memorable(&self) -> bool {
        self.command_data().map(|c| !c.transient).unwrap_or(true)
    }
}

/// Outcome of an activation
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    pub action: ExecutionAction,
    /// Whether the result was pushed into the recents list
    pub recorded: bool,
}

/// Routes activated results to collaborators and owns the recents list,
/// which changes only through [`ActivationDispatcher::activate`].
pub struct ActivationDispatcher {
    platform: Platform,
    recents: RecencyStore,
}

impl ActivationDispatcher {
    pub fn new(platform: Platform, recents: RecencyStore) -> Self {
        Self { platform, recents }
    }

    pub fn recents(&self) -> &RecencyStore {
        &self.recents
    }

    /// Forget all recents.
    pub fn clear_recents(&mut self) {
        self.recents.clear();
    }

    /// Dispatch `result` and record it.
    ///
    /// Collaborator failures are logged and otherwise ignored; the
    /// collaborator's own UI reports them.
    pub fn activate(&mut self, result: &SearchResult) -> Activation {
        let action = result.execution_action();
        self.run(&action);

        let recorded = !matches!(action, ExecutionAction::Unknown { .. }) && result.is_memorable();
        if recorded {
            self.recents.record(result);
        }

        Activation { action, recorded }
    }

    fn run(&self, action: &ExecutionAction) {
        let outcome = match action {
            ExecutionAction::PlayTrack(track) => self.platform.playback.play_track(track),
            ExecutionAction::Navigate { kind, id } => {
                self.platform.navigation.navigate_to(*kind, id)
            }
            ExecutionAction::Command(CommandAction::OpenRoute(route)) => {
                self.platform.navigation.open_route(route)
            }
            ExecutionAction::Command(CommandAction::Player(control)) => {
                self.platform.playback.control(*control)
            }
            ExecutionAction::Command(CommandAction::ToggleSetting(key)) => {
                self.platform.settings.toggle(key)
            }
            ExecutionAction::Command(CommandAction::ShowHelp(topic)) => {
                self.platform.help.show(topic)
            }
            ExecutionAction::Unknown { action } => {
                tracing::warn!(%action, "no handler for command action");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            tracing::warn!(error = %e, ?action, "collaborator failed");
        }
    }
}
