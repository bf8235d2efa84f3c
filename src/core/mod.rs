//! Core palette model - result types and the classifier.
//!
//! Nothing in here touches the runtime, the gateway or any collaborator;
//! it turns already-fetched data into the buckets the view renders.

pub mod search;

pub use search::{
    ClassifierLimits, CommandCategory, CommandData, MediaKind, RawResult, ResultBuckets,
    ResultData, ResultKey, ResultKind, SearchEngine, SearchResult,
};
