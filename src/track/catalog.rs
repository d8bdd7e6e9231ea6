//! Lifecycle catalog over a version range
//!
//! Pure set algebra over already-materialized per-version symbol sets;
//! the builders never touch the network.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::Utc;
use serde::Serialize;

use crate::track::types::ApiCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Present,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLifecycle {
    /// First version in range where the symbol was seen, or `None` when it
    /// was already present at the range start (introduction unknowable)
    pub introduced: Option<String>,
    /// First version where the symbol went missing after having appeared;
    /// fixed at the first vanishing point, never overwritten
    pub removed: Option<String>,
    pub status: ApiStatus,
    /// Versions where the symbol was seen, in range order
    pub present_in: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub total: usize,
    pub present: usize,
    pub removed: usize,
    pub introduced_in_range: usize,
    pub already_present: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCatalog {
    pub api_types: Vec<ApiCategory>,
    pub since: String,
    pub until: String,
    pub generated_timestamp: String,
    pub total_apis: usize,
    pub apis: BTreeMap<String, ApiLifecycle>,
    pub summary: CatalogSummary,
}

/// Build the full lifecycle catalog for a range.
///
/// `sets` maps each version in `versions` to its symbol set (already
/// unioned across categories); versions without an entry are treated as
/// empty, which is how fetch failures degrade.
pub fn build_catalog(
    api_types: &[ApiCategory],
    versions: &[String],
    sets: &HashMap<String, BTreeSet<String>>,
) -> ApiCatalog {
    let empty = BTreeSet::new();
    let set_for = |version: &String| sets.get(version).unwrap_or(&empty);

    let mut all_apis = BTreeSet::new();
    for version in versions {
        all_apis.extend(set_for(version).iter().cloned());
    }

    let first_version = versions.first().cloned().unwrap_or_default();
    let last_version = versions.last().cloned().unwrap_or_default();
    let last_set = versions.last().map(set_for).unwrap_or(&empty);

    let mut apis = BTreeMap::new();
    for api in &all_apis {
        let mut present_in = Vec::new();
        let mut removed = None;

        for version in versions {
            if set_for(version).contains(api) {
                present_in.push(version.clone());
            } else if !present_in.is_empty() && removed.is_none() {
                removed = Some(version.clone());
            }
        }

        // A symbol seen at the very first version may predate the range,
        // so its introduction point is reported as unknown
        let introduced = present_in
            .first()
            .filter(|first_seen| **first_seen != first_version)
            .cloned();

        let status = if last_set.contains(api) {
            ApiStatus::Present
        } else {
            ApiStatus::Removed
        };

        apis.insert(
            api.clone(),
            ApiLifecycle {
                introduced,
                removed,
                status,
                present_in,
            },
        );
    }

    let summary = CatalogSummary {
        total: apis.len(),
        present: apis
            .values()
            .filter(|a| a.status == ApiStatus::Present)
            .count(),
        removed: apis
            .values()
            .filter(|a| a.status == ApiStatus::Removed)
            .count(),
        introduced_in_range: apis.values().filter(|a| a.introduced.is_some()).count(),
        already_present: apis
            .values()
            .filter(|a| a.introduced.is_none() && !a.present_in.is_empty())
            .count(),
    };

    ApiCatalog {
        api_types: api_types.to_vec(),
        since: first_version,
        until: last_version,
        generated_timestamp: Utc::now().to_rfc3339(),
        total_apis: apis.len(),
        apis,
        summary,
    }
}
