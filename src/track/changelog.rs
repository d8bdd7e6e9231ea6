//! Version-by-version API diffs
//!
//! Consecutive-pair set differences over already-materialized per-version
//! symbol sets, plus a net summary: a symbol added and later removed
//! within the range nets to neither list, because the net sets answer
//! "compared to the start, what's different at the end".

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use serde::Serialize;

use crate::track::error::TrackError;
use crate::track::types::ApiCategory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDiff {
    pub version: String,
    pub previous: String,
    pub total_apis: usize,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub added_count: usize,
    pub removed_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogSummary {
    pub total_added: usize,
    pub total_removed: usize,
    pub all_added: Vec<String>,
    pub all_removed: Vec<String>,
    pub net_new: Vec<String>,
    pub net_removed: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiChangelog {
    pub api_types: Vec<ApiCategory>,
    pub since: String,
    pub until: String,
    pub generated_timestamp: String,
    pub versions: Vec<VersionDiff>,
    pub summary: ChangelogSummary,
}

/// Diff two symbol sets into a changelog entry
pub fn diff_pair(
    previous: &str,
    version: &str,
    previous_set: &BTreeSet<String>,
    current_set: &BTreeSet<String>,
) -> VersionDiff {
    let added: Vec<String> = current_set.difference(previous_set).cloned().collect();
    let removed: Vec<String> = previous_set.difference(current_set).cloned().collect();

    VersionDiff {
        version: version.to_string(),
        previous: previous.to_string(),
        total_apis: current_set.len(),
        added_count: added.len(),
        removed_count: removed.len(),
        added,
        removed,
    }
}

/// Build the changelog for a range of at least two versions.
///
/// `sets` maps each version to its symbol set (already unioned across
/// categories); versions without an entry are treated as empty.
pub fn build_changelog(
    api_types: &[ApiCategory],
    versions: &[String],
    sets: &HashMap<String, BTreeSet<String>>,
) -> Result<ApiChangelog, TrackError> {
    if versions.len() < 2 {
        return Err(TrackError::InsufficientRange(versions.len()));
    }

    let empty = BTreeSet::new();
    let set_for = |version: &String| sets.get(version).unwrap_or(&empty);

    let mut diffs = Vec::new();
    let mut total_added = 0;
    let mut total_removed = 0;
    let mut all_added = BTreeSet::new();
    let mut all_removed = BTreeSet::new();

    for pair in versions.windows(2) {
        let diff = diff_pair(&pair[0], &pair[1], set_for(&pair[0]), set_for(&pair[1]));

        total_added += diff.added_count;
        total_removed += diff.removed_count;
        all_added.extend(diff.added.iter().cloned());
        all_removed.extend(diff.removed.iter().cloned());
        diffs.push(diff);
    }

    let net_new: Vec<String> = all_added.difference(&all_removed).cloned().collect();
    let net_removed: Vec<String> = all_removed.difference(&all_added).cloned().collect();

    Ok(ApiChangelog {
        api_types: api_types.to_vec(),
        since: versions[0].clone(),
        until: versions[versions.len() - 1].clone(),
        generated_timestamp: Utc::now().to_rfc3339(),
        versions: diffs,
        summary: ChangelogSummary {
            total_added,
            total_removed,
            all_added: all_added.into_iter().collect(),
            all_removed: all_removed.into_iter().collect(),
            net_new,
            net_removed,
        },
    })
}
