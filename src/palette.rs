//! The command palette state holder.
//!
//! [`Palette`] wires the query controller, classifier, selection model and
//! activation dispatcher together. The host drives it with text changes,
//! four discrete commands, and the responses produced by [`Palette::pump`].
//! Every handler is infallible: failures degrade to an empty list plus an
//! error flag for the view.

use std::sync::Arc;

use crate::config::Config;
use crate::controller::{ApplyOutcome, QueryController, SearchResponse};
use crate::core::search::{ResultBuckets, SearchEngine, SearchResult};
use crate::executor::{Activation, ActivationDispatcher};
use crate::platform::Platform;
use crate::selection::SelectionModel;
use crate::services::catalog::CommandCatalog;
use crate::services::gateway::SearchGateway;
use crate::services::recents::{RecencyEntry, RecencyStore};

/// Discrete keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteCommand {
    MoveUp,
    MoveDown,
    Confirm,
    Close,
}

/// What the container should do after an input
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteSignal {
    None,
    /// Hide the palette surface
    Close,
    /// An item was activated; hide the palette surface
    Activated(Activation),
}

impl PaletteSignal {
    pub fn should_close(&self) -> bool {
        !matches!(self, PaletteSignal::None)
    }
}

/// Which body the view should render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Closed,
    /// Empty query, no history yet
    QuickAccess,
    /// Empty query, recent items listed
    Recent,
    Loading,
    Error,
    NoResults,
    Results,
}

pub struct Palette {
    engine: SearchEngine,
    catalog: CommandCatalog,
    controller: QueryController,
    selection: SelectionModel,
    dispatcher: ActivationDispatcher,
    buckets: ResultBuckets,
    is_open: bool,
}

impl Palette {
    pub fn new(
        config: &Config,
        gateway: Arc<dyn SearchGateway>,
        platform: Platform,
        recents: RecencyStore,
    ) -> Self {
        let mut palette = Self {
            engine: SearchEngine::new(config),
            catalog: CommandCatalog::builtin(),
            controller: QueryController::new(gateway, config.search.debounce()),
            selection: SelectionModel::default(),
            dispatcher: ActivationDispatcher::new(platform, recents),
            buckets: ResultBuckets::default(),
            is_open: false,
        };
        palette.refresh();
        palette
    }

    /// Replace the built-in command table.
    pub fn with_catalog(mut self, catalog: CommandCatalog) -> Self {
        self.catalog = catalog;
        self.refresh();
        self
    }

    /// Show the palette with an empty query (recent items).
    pub fn open(&mut self) {
        self.is_open = true;
        self.controller.set_query("");
        self.refresh();
    }

    /// Hide the palette, dropping the query and any pending search.
    pub fn close(&mut self) {
        self.is_open = false;
        self.controller.set_query("");
        self.refresh();
    }

    pub fn on_query_change(&mut self, text: impl Into<String>) {
        if !self.is_open {
            tracing::debug!("query change ignored while closed");
            return;
        }

        self.controller.set_query(text);
        // Commands match synchronously; remote results follow via pump
        self.refresh();
    }

    pub fn handle(&mut self, command: PaletteCommand) -> PaletteSignal {
        if !self.is_open {
            return PaletteSignal::None;
        }

        match command {
            PaletteCommand::MoveUp => {
                self.selection.move_up();
                PaletteSignal::None
            }
            PaletteCommand::MoveDown => {
                self.selection.move_down();
                PaletteSignal::None
            }
            PaletteCommand::Confirm => self.confirm(),
            PaletteCommand::Close => {
                self.close();
                PaletteSignal::Close
            }
        }
    }

    /// Activate the row at `index` (pointer click).
    pub fn confirm_index(&mut self, index: usize) -> PaletteSignal {
        if !self.is_open || index >= self.buckets.len() {
            return PaletteSignal::None;
        }

        self.selection.select(index);
        self.confirm()
    }

    fn confirm(&mut self) -> PaletteSignal {
        let Some(result) = self.selected().cloned() else {
            return PaletteSignal::None;
        };

        let activation = self.dispatcher.activate(&result);
        self.close();
        PaletteSignal::Activated(activation)
    }

    /// Feed a gateway response; the list is rebuilt if it was current.
    pub fn apply_response(&mut self, response: SearchResponse) -> ApplyOutcome {
        let outcome = self.controller.apply(response);
        if outcome != ApplyOutcome::Stale {
            self.refresh();
        }
        outcome
    }

    /// Wait for the next gateway response and apply it.
    pub async fn pump(&mut self) -> Option<ApplyOutcome> {
        let response = self.controller.next_response().await?;
        Some(self.apply_response(response))
    }

    /// Apply every response that has already arrived. Returns how many
    /// were processed, stale ones included.
    pub fn pump_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Some(response) = self.controller.try_next_response() {
            self.apply_response(response);
            processed += 1;
        }
        processed
    }

    /// Forget all recent items.
    pub fn clear_recents(&mut self) {
        self.dispatcher.clear_recents();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.buckets = if self.controller.error().is_some() {
            ResultBuckets::Matches {
                exact_matches: Vec::new(),
                recommendations: Vec::new(),
            }
        } else {
            self.engine.classify(
                self.controller.query(),
                self.controller.results(),
                self.catalog.commands(),
                self.dispatcher.recents().entries(),
            )
        };
        self.selection.reset(self.buckets.len());
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn query(&self) -> &str {
        self.controller.query()
    }

    pub fn generation(&self) -> u64 {
        self.controller.generation()
    }

    pub fn buckets(&self) -> &ResultBuckets {
        &self.buckets
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.selected()
    }

    pub fn selected(&self) -> Option<&SearchResult> {
        self.buckets.get(self.selection.selected()?)
    }

    pub fn is_loading(&self) -> bool {
        self.controller.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.controller.error()
    }

    pub fn recents(&self) -> &[RecencyEntry] {
        self.dispatcher.recents().entries()
    }

    pub fn view_state(&self) -> ViewState {
        if !self.is_open {
            ViewState::Closed
        } else if self.buckets.is_recent() {
            if self.buckets.is_empty() {
                ViewState::QuickAccess
            } else {
                ViewState::Recent
            }
        } else if self.is_loading() {
            ViewState::Loading
        } else if self.error().is_some() {
            ViewState::Error
        } else if self.buckets.is_empty() {
            ViewState::NoResults
        } else {
            ViewState::Results
        }
    }
}
