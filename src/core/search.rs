//! Search result model and the result classifier.
//!
//! The classifier merges remote catalog results, built-in commands and the
//! recency list into [`ResultBuckets`]. It partitions; it does not rank.
//! Upstream order is preserved inside each bucket.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::search::{QueryContext, TextMatch};
use crate::services::recents::RecencyEntry;

/// Kinds of entity the remote catalog can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Track,
    Album,
    Artist,
    Playlist,
}

/// Kind of a palette row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Track,
    Album,
    Artist,
    Playlist,
    Command,
}

impl From<MediaKind> for ResultKind {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Track => ResultKind::Track,
            MediaKind::Album => ResultKind::Album,
            MediaKind::Artist => ResultKind::Artist,
            MediaKind::Playlist => ResultKind::Playlist,
        }
    }
}

impl ResultKind {
    /// Badge label shown next to a row.
    pub fn label(&self) -> &'static str {
        match self {
            ResultKind::Track => "Track",
            ResultKind::Album => "Album",
            ResultKind::Artist => "Artist",
            ResultKind::Playlist => "Playlist",
            ResultKind::Command => "Command",
        }
    }
}

/// Category of a built-in command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandCategory {
    Navigation,
    Player,
    Settings,
    Help,
}

impl CommandCategory {
    pub fn name(&self) -> &'static str {
        match self {
            CommandCategory::Navigation => "navigation",
            CommandCategory::Player => "player",
            CommandCategory::Settings => "settings",
            CommandCategory::Help => "help",
        }
    }
}

/// Payload carried by a command row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandData {
    pub category: CommandCategory,
    #[serde(default)]
    pub shortcut: Option<String>,
    /// Action tag, e.g. `nav:library` or `player:next`
    pub action: String,
    /// Transient commands (help panels and the like) are not remembered
    #[serde(default)]
    pub transient: bool,
}

/// A single entity returned by the search gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Upstream similarity item that may not match the query literally
    #[serde(default)]
    pub related: bool,
    /// Catalog entity as delivered upstream, handed to collaborators untouched
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Type-specific data attached to a [`SearchResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ResultData {
    Command(CommandData),
    Media(RawResult),
}

/// Identity of a row across sources. Ids alone may collide between a
/// track and a command, so the kind is part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultKey {
    pub kind: ResultKind,
    pub id: String,
}

/// A row in the palette.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: String,
    pub kind: ResultKind,
    pub title: String,
    pub subtitle: String,
    pub image: Option<String>,
    pub data: ResultData,
}

impl SearchResult {
    pub fn from_media(raw: RawResult) -> Self {
        Self {
            id: raw.id.clone(),
            kind: raw.kind.into(),
            title: raw.title.clone(),
            subtitle: raw.subtitle.clone(),
            image: raw.image.clone(),
            data: ResultData::Media(raw),
        }
    }

    pub fn command(
        id: impl Into<String>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        data: CommandData,
    ) -> Self {
        Self {
            id: id.into(),
            kind: ResultKind::Command,
            title: title.into(),
            subtitle: subtitle.into(),
            image: None,
            data: ResultData::Command(data),
        }
    }

    pub fn key(&self) -> ResultKey {
        ResultKey {
            kind: self.kind,
            id: self.id.clone(),
        }
    }

    pub fn command_data(&self) -> Option<&CommandData> {
        match &self.data {
            ResultData::Command(data) => Some(data),
            ResultData::Media(_) => None,
        }
    }

    pub fn media(&self) -> Option<&RawResult> {
        match &self.data {
            ResultData::Media(raw) => Some(raw),
            ResultData::Command(_) => None,
        }
    }

    /// Keyboard shortcut hint, commands only.
    pub fn shortcut(&self) -> Option<&str> {
        self.command_data().and_then(|c| c.shortcut.as_deref())
    }
}

/// Ordered output of the classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultBuckets {
    /// Empty query: most-recently-used items.
    Recent(Vec<SearchResult>),
    /// Non-empty query: title-prefix matches, then everything else.
    Matches {
        exact_matches: Vec<SearchResult>,
        recommendations: Vec<SearchResult>,
    },
}

impl Default for ResultBuckets {
    fn default() -> Self {
        ResultBuckets::Recent(Vec::new())
    }
}

impl ResultBuckets {
    pub fn is_recent(&self) -> bool {
        matches!(self, ResultBuckets::Recent(_))
    }

    pub fn exact_matches(&self) -> &[SearchResult] {
        match self {
            ResultBuckets::Matches { exact_matches, .. } => exact_matches.as_slice(),
            ResultBuckets::Recent(_) => &[],
        }
    }

    pub fn recommendations(&self) -> &[SearchResult] {
        match self {
            ResultBuckets::Matches {
                recommendations, ..
            } => recommendations.as_slice(),
            ResultBuckets::Recent(_) => &[],
        }
    }

    pub fn recent_items(&self) -> &[SearchResult] {
        match self {
            ResultBuckets::Recent(items) => items.as_slice(),
            ResultBuckets::Matches { .. } => &[],
        }
    }

    /// Total number of selectable rows.
    pub fn len(&self) -> usize {
        match self {
            ResultBuckets::Recent(items) => items.len(),
            ResultBuckets::Matches {
                exact_matches,
                recommendations,
            } => exact_matches.len() + recommendations.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row at a flat position over `exact_matches ++ recommendations`
    /// (or `recent_items`).
    pub fn get(&self, index: usize) -> Option<&SearchResult> {
        match self {
            ResultBuckets::Recent(items) => items.get(index),
            ResultBuckets::Matches {
                exact_matches,
                recommendations,
            } => exact_matches
                .get(index)
                .or_else(|| recommendations.get(index.checked_sub(exact_matches.len())?)),
        }
    }

    /// All rows in flat order.
    pub fn iter(&self) -> impl Iterator<Item = &SearchResult> {
        let (first, second): (&[SearchResult], &[SearchResult]) = match self {
            ResultBuckets::Recent(items) => (items.as_slice(), [].as_slice()),
            ResultBuckets::Matches {
                exact_matches,
                recommendations,
            } => (exact_matches.as_slice(), recommendations.as_slice()),
        };
        first.iter().chain(second.iter())
    }
}

/// Bucket size limits applied by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierLimits {
    pub max_exact_matches: usize,
    pub max_recommendations: usize,
    pub max_total_results: usize,
    pub recent_display_limit: usize,
}

impl ClassifierLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_exact_matches: config.search.max_exact_matches,
            max_recommendations: config.search.max_recommendations,
            max_total_results: config.search.max_total_results,
            recent_display_limit: config.recents.display_limit,
        }
    }
}

impl Default for ClassifierLimits {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Exact,
    Recommendation,
}

/// The classifier that turns a query and its sources into buckets.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    limits: ClassifierLimits,
}

impl SearchEngine {
    pub fn new(config: &Config) -> Self {
        Self::with_limits(ClassifierLimits::from_config(config))
    }

    pub fn with_limits(limits: ClassifierLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> ClassifierLimits {
        self.limits
    }

    /// Classify remote results, commands and recents for `query`.
    ///
    /// An empty (or blank) query ignores everything but `recents`.
    pub fn classify(
        &self,
        query: &str,
        raw_results: &[RawResult],
        commands: &[SearchResult],
        recents: &[RecencyEntry],
    ) -> ResultBuckets {
        let ctx = QueryContext::new(query);

        if ctx.is_empty() {
            return ResultBuckets::Recent(
                recents
                    .iter()
                    .take(self.limits.recent_display_limit)
                    .map(RecencyEntry::to_result)
                    .collect(),
            );
        }

        let remote = raw_results.iter().filter_map(|raw| {
            let placement = Self::place_media(&ctx, raw)?;
            Some((placement, SearchResult::from_media(raw.clone())))
        });
        let local = commands
            .iter()
            .filter_map(|cmd| Some((Self::place_command(&ctx, cmd)?, cmd.clone())));

        let mut seen = HashSet::new();
        let mut exact_matches = Vec::new();
        let mut recommendations = Vec::new();

        for (placement, result) in remote.chain(local) {
            if !seen.insert(result.key()) {
                continue;
            }
            match placement {
                Placement::Exact => exact_matches.push(result),
                Placement::Recommendation => recommendations.push(result),
            }
        }

        let total = self.limits.max_total_results;
        exact_matches.truncate(self.limits.max_exact_matches.min(total));
        let remaining = total - exact_matches.len();
        recommendations.truncate(self.limits.max_recommendations.min(remaining));

        ResultBuckets::Matches {
            exact_matches,
            recommendations,
        }
    }

    fn place_media(ctx: &QueryContext, raw: &RawResult) -> Option<Placement> {
        if raw.related {
            return Some(Placement::Recommendation);
        }

        match ctx.match_text(&raw.title) {
            Some(TextMatch::Prefix) => Some(Placement::Exact),
            Some(TextMatch::Substring) => Some(Placement::Recommendation),
            None if ctx.is_contained_in(&raw.subtitle) => Some(Placement::Recommendation),
            None => None,
        }
    }

    fn place_command(ctx: &QueryContext, cmd: &SearchResult) -> Option<Placement> {
        let category_match = cmd
            .command_data()
            .map(|data| ctx.is_contained_in(data.category.name()))
            .unwrap_or(false);

        match ctx.match_text(&cmd.title) {
            Some(TextMatch::Prefix) => Some(Placement::Exact),
            Some(TextMatch::Substring) => Some(Placement::Recommendation),
            None if category_match => Some(Placement::Recommendation),
            None => None,
        }
    }
}
