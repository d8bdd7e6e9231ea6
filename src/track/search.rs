//! Backward boundary search for one symbol's lifecycle
//!
//! Walks the version list newest-first and stops at the first boundary it
//! can prove, so a recent symbol costs a handful of fetches instead of one
//! per known release.

use serde::Serialize;
use tracing::{debug, info};

use crate::track::store::SymbolSource;
use crate::track::types::ApiCategory;
use crate::track::versions::VersionRegistry;

/// Where a symbol's presence run begins, as far as the walk observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "version")]
pub enum Origin {
    /// First present version directly after an observed absence
    Introduced(String),
    /// Present in the oldest version examined; the true introduction
    /// predates recorded history and is unknowable
    AtLeast(String),
}

impl Origin {
    /// The version the run begins at, whichever way it was established
    pub fn version(&self) -> &str {
        match self {
            Origin::Introduced(v) | Origin::AtLeast(v) => v,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub api_name: String,
    pub category: ApiCategory,
    pub origin: Option<Origin>,
    /// First version, moving forward in time, where the symbol is missing
    /// after having existed
    pub removed: Option<String>,
    /// Versions where the symbol was seen, oldest first
    pub present_in: Vec<String>,
    /// Versions examined where the symbol was absent
    pub not_found_in: Vec<String>,
    /// How many versions were actually fetched; the point of the walk is
    /// that this is usually far smaller than the full list
    pub versions_checked: usize,
}

impl SearchResult {
    pub fn found(&self) -> bool {
        !self.present_in.is_empty()
    }
}

/// States of the backward walk. Transitions are driven purely by each
/// version's membership result, so the stopping condition is the state
/// itself rather than embedded break logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    /// Inside the newest unbroken run of presence
    AnchoredPresent,
    /// No presence observed yet; still walking toward the newest version
    /// that has the symbol
    AnchoredAbsent,
    /// The introduction boundary of the located run has been crossed;
    /// nothing more to learn unless a full scan was requested
    Transitioned,
}

impl WalkState {
    fn next(self, present: bool) -> WalkState {
        match (self, present) {
            (WalkState::AnchoredPresent, true) => WalkState::AnchoredPresent,
            (WalkState::AnchoredPresent, false) => WalkState::Transitioned,
            (WalkState::AnchoredAbsent, true) => WalkState::AnchoredPresent,
            (WalkState::AnchoredAbsent, false) => WalkState::AnchoredAbsent,
            (WalkState::Transitioned, _) => WalkState::Transitioned,
        }
    }
}

pub struct BoundarySearch<'a, S: SymbolSource> {
    source: &'a S,
    registry: &'a VersionRegistry,
    full_scan: bool,
}

impl<'a, S: SymbolSource> BoundarySearch<'a, S> {
    pub fn new(source: &'a S, registry: &'a VersionRegistry) -> Self {
        Self {
            source,
            registry,
            full_scan: false,
        }
    }

    /// Walk the entire list instead of stopping at the first boundary
    pub fn full_scan(mut self, full_scan: bool) -> Self {
        self.full_scan = full_scan;
        self
    }

    /// Locate the introduction and/or removal point of one symbol.
    ///
    /// Anchored at the newest version: when the symbol is present there,
    /// the walk looks for the introduction boundary; when absent, it first
    /// seeks the newest release that still had the symbol, then continues
    /// to the introduction boundary of that run.
    pub async fn find_history(&self, api_name: &str, category: ApiCategory) -> SearchResult {
        info!(
            "Searching for '{}' in {} API documentation",
            api_name,
            category.as_str()
        );

        let mut result = SearchResult {
            api_name: api_name.to_string(),
            category,
            origin: None,
            removed: None,
            present_in: Vec::new(),
            not_found_in: Vec::new(),
            versions_checked: 0,
        };

        let mut state = WalkState::AnchoredAbsent;

        for version in self.registry.all().iter().rev() {
            if state == WalkState::Transitioned && !self.full_scan {
                break;
            }

            let present = self
                .source
                .symbols(version, category)
                .await
                .contains(api_name);
            result.versions_checked += 1;
            debug!(
                "CUDA {}: {}",
                version,
                if present { "found" } else { "not found" }
            );

            if present {
                result.present_in.push(version.clone());
            } else {
                result.not_found_in.push(version.clone());
            }

            state = state.next(present);
        }

        self.conclude(&mut result);
        result
    }

    /// Derive origin and removal from the recorded walk
    fn conclude(&self, result: &mut SearchResult) {
        let rank = |v: &String| self.registry.rank(v).unwrap_or(usize::MAX);
        result.present_in.sort_by_key(rank);
        result.not_found_in.sort_by_key(rank);

        let (Some(oldest), Some(newest)) = (result.present_in.first(), result.present_in.last())
        else {
            return;
        };

        // Whenever the run's oldest version has rank > 0 the version just
        // below it was examined and found absent, so the boundary is real.
        result.origin = Some(match self.registry.rank(oldest) {
            Some(0) => Origin::AtLeast(oldest.clone()),
            _ => Origin::Introduced(oldest.clone()),
        });

        if let Some(newest_rank) = self.registry.rank(newest) {
            if let Some(next_newer) = self.registry.all().get(newest_rank + 1) {
                result.removed = Some(next_newer.clone());
            }
        }
    }
}
