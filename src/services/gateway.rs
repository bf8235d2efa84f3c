//! Search gateway boundary and a fixture-backed implementation.
//!
//! The gateway wraps the remote catalog API. It may fail or answer late;
//! ordering and staleness are handled by the query controller, never here.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures_lite::future::Boxed;

use crate::core::search::RawResult;
use crate::error::EncoreResult;
use crate::search::QueryContext;

/// Remote catalog search.
pub trait SearchGateway: Send + Sync {
    /// Search the catalog. The future must be `'static` so it can run on
    /// its own task.
    fn search(&self, query: &str) -> Boxed<EncoreResult<Vec<RawResult>>>;
}

/// Gateway over an in-memory item list, with optional simulated latency.
///
/// Items flagged `related` are returned after the literal matches whenever
/// at least one literal match exists, imitating upstream "similar" items.
#[derive(Debug, Clone)]
pub struct FixtureGateway {
    items: Arc<Vec<RawResult>>,
    latency: Duration,
    limit: usize,
}

impl FixtureGateway {
    pub fn new(items: Vec<RawResult>) -> Self {
        Self {
            items: Arc::new(items),
            latency: Duration::ZERO,
            limit: 20,
        }
    }

    /// Load items from a JSON array file.
    pub fn from_file(path: &Path) -> EncoreResult<Self> {
        let contents = fs::read_to_string(path)?;
        let items: Vec<RawResult> = serde_json::from_str(&contents)?;
        tracing::info!(path = %path.display(), items = items.len(), "loaded search fixture");
        Ok(Self::new(items))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn lookup(items: &[RawResult], query: &str, limit: usize) -> Vec<RawResult> {
        let ctx = QueryContext::new(query);
        if ctx.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<RawResult> = items
            .iter()
            .filter(|item| !item.related)
            .filter(|item| ctx.is_contained_in(&item.title) || ctx.is_contained_in(&item.subtitle))
            .take(limit)
            .cloned()
            .collect();

        if !results.is_empty() {
            let room = limit.saturating_sub(results.len());
            results.extend(items.iter().filter(|item| item.related).take(room).cloned());
        }

        results
    }
}

impl SearchGateway for FixtureGateway {
    fn search(&self, query: &str) -> Boxed<EncoreResult<Vec<RawResult>>> {
        let items = Arc::clone(&self.items);
        let query = query.to_string();
        let latency = self.latency;
        let limit = self.limit;

        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            Ok(Self::lookup(&items, &query, limit))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::search::MediaKind;

    fn item(id: &str, title: &str, subtitle: &str, related: bool) -> RawResult {
        RawResult {
            id: id.to_string(),
            kind: MediaKind::Track,
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            image: None,
            related,
            payload: serde_json::Value::Null,
        }
    }

    fn fixture() -> FixtureGateway {
        FixtureGateway::new(vec![
            item("1", "Arctic Waves", "Polar Band", false),
            item("2", "Desert Song", "Sand Trio", false),
            item("3", "Northern Lights", "Arctic Choir", false),
            item("4", "Glacier", "Ice Ensemble", true),
        ])
    }

    #[tokio::test]
    async fn test_matches_title_and_subtitle() {
        let results = fixture().search("arctic").await.unwrap();
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
    }

    #[tokio::test]
    async fn test_no_literal_match_returns_nothing() {
        let results = fixture().search("zzz").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_limit_applies() {
        let results = fixture().with_limit(1).search("arctic").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let gateway = fixture().with_latency(Duration::from_millis(500));
        let start = tokio::time::Instant::now();

        gateway.search("desert").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"[{"id":"a","type":"artist","title":"Arca","subtitle":"Artist"}]"#,
        )
        .unwrap();

        let gateway = FixtureGateway::from_file(&path).unwrap();
        assert_eq!(gateway.items.len(), 1);
        assert_eq!(gateway.items[0].kind, MediaKind::Artist);
    }
}
