//! Encore terminal driver.
//!
//! Runs the palette against a JSON catalog fixture. Each stdin line is the
//! new query text; lines starting with `/` are palette commands.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use encore::{
    Config, FixtureGateway, JsonFileBackend, Palette, PaletteCommand, PaletteSignal, Platform,
    RecencyStore, ResultBuckets, ViewState,
};

#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Keyboard-driven command palette for music browsing", long_about = None)]
struct Cli {
    /// JSON array of catalog items to search
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Config file (default: platform config dir)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Recents file, overriding the config value
    #[arg(long, value_name = "FILE")]
    recents: Option<PathBuf>,

    /// Simulated gateway latency
    #[arg(long, value_name = "MS", default_value_t = 0)]
    latency_ms: u64,
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Open,
    Command(PaletteCommand),
    Select(usize),
    ClearRecents,
    Quit,
    Query(String),
}

fn parse_input(line: &str) -> Input {
    match line.trim_end_matches(['\r', '\n']) {
        "/open" => Input::Open,
        "/up" => Input::Command(PaletteCommand::MoveUp),
        "/down" => Input::Command(PaletteCommand::MoveDown),
        "/enter" => Input::Command(PaletteCommand::Confirm),
        "/close" => Input::Command(PaletteCommand::Close),
        "/clear" => Input::ClearRecents,
        "/quit" => Input::Quit,
        other => match other.strip_prefix("/pick ").map(str::parse) {
            Some(Ok(index)) => Input::Select(index),
            _ => Input::Query(other.to_string()),
        },
    }
}

fn render(palette: &Palette) {
    match palette.view_state() {
        ViewState::Closed => println!("(closed - /open to show the palette)"),
        ViewState::QuickAccess => println!("Type to search tracks, albums, artists and commands"),
        ViewState::Loading => println!("Searching for \"{}\"...", palette.query()),
        ViewState::Error => println!(
            "Search failed: {}",
            palette.error().unwrap_or("unknown error")
        ),
        ViewState::NoResults => println!("No results for \"{}\"", palette.query()),
        ViewState::Recent | ViewState::Results => {}
    }

    let selected = palette.selected_index();
    let mut index = 0;
    let mut section = |title: &str, rows: &[encore::SearchResult]| {
        if rows.is_empty() {
            return;
        }
        println!("{title}");
        for row in rows {
            let marker = if selected == Some(index) { '>' } else { ' ' };
            let shortcut = row.shortcut().map(|s| format!("  [{s}]")).unwrap_or_default();
            println!(
                "{marker} {:<8} {} - {}{shortcut}",
                row.kind.label(),
                row.title,
                row.subtitle
            );
            index += 1;
        }
    };

    match palette.buckets() {
        ResultBuckets::Recent(items) => section("Recent", items),
        ResultBuckets::Matches {
            exact_matches,
            recommendations,
        } => {
            section("Results", exact_matches);
            section("Recommended", recommendations);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("ENCORE_LOG")
                .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| "encore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    let gateway = match &cli.catalog {
        Some(path) => FixtureGateway::from_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => {
            tracing::warn!("no --catalog given, only commands will match");
            FixtureGateway::new(Vec::new())
        }
    }
    .with_latency(Duration::from_millis(cli.latency_ms));

    let recents_path = cli
        .recents
        .clone()
        .unwrap_or_else(|| config.recents.resolved_path());
    let recents = RecencyStore::load(
        Box::new(JsonFileBackend::new(recents_path)),
        config.recents.capacity,
    );

    let mut palette = Palette::new(&config, Arc::new(gateway), Platform::logging(), recents);
    palette.open();
    render(&palette);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };

                let signal = match parse_input(&line) {
                    Input::Open => {
                        palette.open();
                        PaletteSignal::None
                    }
                    Input::Command(command) => palette.handle(command),
                    Input::Select(index) => palette.confirm_index(index),
                    Input::ClearRecents => {
                        palette.clear_recents();
                        PaletteSignal::None
                    }
                    Input::Quit => break,
                    Input::Query(text) => {
                        palette.on_query_change(text);
                        PaletteSignal::None
                    }
                };

                if let PaletteSignal::Activated(activation) = &signal {
                    println!("activated: {:?}", activation.action);
                }
                render(&palette);
            }
            Some(outcome) = palette.pump() => {
                tracing::debug!(?outcome, "search response");
                render(&palette);
            }
        }
    }

    Ok(())
}
