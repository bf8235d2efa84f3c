//! Built-in palette commands.

use once_cell::sync::Lazy;

use crate::core::search::{CommandCategory, CommandData, ResultData, SearchResult};

static BUILTIN_COMMANDS: Lazy<Vec<SearchResult>> = Lazy::new(|| {
    use CommandCategory::*;

    vec![
        // Navigation
        command("home", "Go to Home", "Back to the start page", Navigation, Some("G H"), "nav:home"),
        command("library", "Open Library", "Your saved music", Navigation, Some("G L"), "nav:library"),
        command("search", "Search Music", "Find tracks, albums, artists", Navigation, Some("/"), "nav:search"),
        command("playlists", "Browse Playlists", "All of your playlists", Navigation, None, "nav:playlists"),
        // Player
        command("play-pause", "Play / Pause", "Toggle playback", Player, Some("Space"), "player:toggle"),
        command("next", "Next Track", "Skip to the next track", Player, Some("Shift+N"), "player:next"),
        command("previous", "Previous Track", "Go back one track", Player, Some("Shift+P"), "player:previous"),
        command("shuffle", "Shuffle Playlist", "Toggle shuffle", Player, Some("S"), "player:shuffle"),
        command("repeat", "Toggle Repeat", "Cycle repeat mode", Player, Some("R"), "player:repeat"),
        // Settings
        command("dark-mode", "Toggle Dark Mode", "Switch between light and dark", Settings, Some("Ctrl+Shift+L"), "settings:dark-mode"),
        command("settings", "Open Settings", "Preferences and account", Settings, Some("Ctrl+,"), "nav:settings"),
        // Help
        transient(command("shortcuts", "Keyboard Shortcuts", "Show all shortcuts", Help, Some("?"), "help:shortcuts")),
        transient(command("about", "About", "Version and credits", Help, None, "help:about")),
    ]
});

fn command(
    id: &str,
    label: &str,
    description: &str,
    category: CommandCategory,
    shortcut: Option<&str>,
    action: &str,
) -> SearchResult {
    SearchResult::command(
        format!("cmd:{}", id),
        label,
        description,
        CommandData {
            category,
            shortcut: shortcut.map(str::to_string),
            action: action.to_string(),
            transient: false,
        },
    )
}

fn transient(mut result: SearchResult) -> SearchResult {
    if let ResultData::Command(data) = &mut result.data {
        data.transient = true;
    }
    result
}

/// Static table of commands offered alongside catalog results.
#[derive(Debug, Clone)]
pub struct CommandCatalog {
    commands: Vec<SearchResult>,
}

impl CommandCatalog {
    /// The built-in navigation, player, settings and help commands.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_COMMANDS.clone())
    }

    /// A catalog with a custom command table. Non-command rows are dropped.
    pub fn new(commands: Vec<SearchResult>) -> Self {
        let commands = commands
            .into_iter()
            .filter(|c| c.command_data().is_some())
            .collect();
        Self { commands }
    }

    pub fn commands(&self) -> &[SearchResult] {
        &self.commands
    }

    pub fn get(&self, id: &str) -> Option<&SearchResult> {
        self.commands.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::search::ResultKind;
    use crate::executor::parse_command_action;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = CommandCatalog::builtin();
        let ids: HashSet<_> = catalog.commands().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_builtin_actions_all_parse() {
        for cmd in CommandCatalog::builtin().commands() {
            let data = cmd.command_data().unwrap();
            assert!(
                parse_command_action(&data.action).is_some(),
                "unparseable action {}",
                data.action
            );
        }
    }

    #[test]
    fn test_help_commands_are_transient() {
        let catalog = CommandCatalog::builtin();
        let shortcuts = catalog.get("cmd:shortcuts").unwrap();
        assert!(shortcuts.command_data().unwrap().transient);
        assert_eq!(shortcuts.shortcut(), Some("?"));

        let home = catalog.get("cmd:home").unwrap();
        assert!(!home.command_data().unwrap().transient);
    }

    #[test]
    fn test_custom_catalog_drops_non_commands() {
        let raw = crate::core::search::RawResult {
            id: "t".to_string(),
            kind: crate::core::search::MediaKind::Track,
            title: "Track".to_string(),
            subtitle: String::new(),
            image: None,
            related: false,
            payload: serde_json::Value::Null,
        };
        let mut rows = CommandCatalog::builtin().commands().to_vec();
        rows.push(SearchResult::from_media(raw));

        let catalog = CommandCatalog::new(rows);
        assert!(catalog.commands().iter().all(|c| c.kind == ResultKind::Command));
        assert_eq!(catalog.len(), CommandCatalog::builtin().len());
    }
}
