//! Case-insensitive query matching shared by the classifier
//!
//! A title prefix makes an exact match and a substring anywhere makes a
//! recommendation.

/// How a piece of text matched the query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    /// Text starts with the query
    Prefix,
    /// Query occurs somewhere after the start
    Substring,
}

/// Context passed to the classifier for one query
pub struct QueryContext {
    /// Trimmed query converted to lowercase
    pub query_lower: String,
}

impl QueryContext {
    pub fn new(query: &str) -> Self {
        Self {
            query_lower: query.trim().to_lowercase(),
        }
    }

    /// Whitespace-only queries count as empty
    pub fn is_empty(&self) -> bool {
        self.query_lower.is_empty()
    }

    /// Match `text` against the query, case-insensitively
    pub fn match_text(&self, text: &str) -> Option<TextMatch> {
        if self.is_empty() {
            return None;
        }

        let text_lower = text.to_lowercase();
        if text_lower.starts_with(&self.query_lower) {
            Some(TextMatch::Prefix)
        } else if text_lower.contains(&self.query_lower) {
            Some(TextMatch::Substring)
        } else {
            None
        }
    }

    /// Check if `text` contains the query anywhere (case-insensitive)
    pub fn is_contained_in(&self, text: &str) -> bool {
        self.match_text(text).is_some()
    }
}
