//! # Fetch State
//!
//! The tagged union every data-fetch view publishes. A view is in exactly one
//! of these states; there is no separate busy flag that could disagree with
//! the stored result.

use std::collections::HashSet;
use tracing::warn;

/// Items with a stable, non-empty key used for list reconciliation.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// State of one data-fetch view.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    /// Not mounted yet, or nothing was ever requested.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// Last request succeeded. May be empty.
    Loaded(Vec<T>),
    /// Last request failed. Holds the reason for display.
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_busy(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// True for `Idle`, `Loaded` and `Failed`.
    pub fn is_settled(&self) -> bool {
        !self.is_busy()
    }

    pub fn items(&self) -> Option<&[T]> {
        match self {
            FetchState::Loaded(items) => Some(items),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FetchState::Idle => "idle",
            FetchState::Loading => "loading",
            FetchState::Loaded(_) => "loaded",
            FetchState::Failed(_) => "failed",
        }
    }
}

impl<T: Keyed> FetchState<T> {
    /// Builds a `Loaded` state, dropping items with an empty key and later
    /// duplicates of a key.
    pub fn loaded(items: Vec<T>) -> Self {
        let mut seen = HashSet::new();
        let received = items.len();
        let kept: Vec<T> = items
            .into_iter()
            .filter(|item| {
                let key = item.key();
                !key.is_empty() && seen.insert(key.to_string())
            })
            .collect();

        if kept.len() != received {
            warn!(received, kept = kept.len(), "Dropped items without a usable key");
        }
        FetchState::Loaded(kept)
    }

    pub fn find(&self, key: &str) -> Option<&T> {
        self.items()?.iter().find(|item| item.key() == key)
    }
}
