//! Ordered registry of known CUDA releases and version token resolution

use crate::track::error::TrackError;

/// Toolkit releases with archived online documentation, oldest first.
/// Hand-curated from https://developer.nvidia.com/cuda-toolkit-archive;
/// 8.x-11.0 use the short major.minor form, 11.1+ the full triple.
const CUDA_VERSIONS: &[&str] = &[
    "8.0",
    "9.0",
    "9.1",
    "9.2",
    "10.0",
    "10.1",
    "10.2",
    "11.0",
    "11.1.0",
    "11.1.1",
    "11.2.0",
    "11.2.1",
    "11.2.2",
    "11.3.0",
    "11.3.1",
    "11.4.0",
    "11.4.1",
    "11.4.2",
    "11.4.3",
    "11.4.4",
    "11.5.0",
    "11.5.1",
    "11.5.2",
    "11.6.0",
    "11.6.1",
    "11.6.2",
    "11.7.0",
    "11.7.1",
    "11.8.0",
    "12.0.0",
    "12.0.1",
    "12.1.0",
    "12.1.1",
    "12.2.0",
    "12.2.1",
    "12.2.2",
    "12.3.0",
    "12.3.1",
    "12.3.2",
    "12.4.0",
    "12.4.1",
    "12.5.0",
    "12.5.1",
    "12.6.0",
    "12.6.1",
    "12.6.2",
    "12.6.3",
    "12.8.0",
    "12.8.1",
    "12.9.0",
    "12.9.1",
    "13.0.0",
    "13.0.1",
    "13.0.2",
    "13.1.0",
    "13.1.1",
];

/// Immutable ordered list of every release the tracker knows about.
///
/// Constructed once at startup and passed by reference to the components
/// that need version ordering. Rank equals index in the list.
#[derive(Debug, Clone)]
pub struct VersionRegistry {
    versions: Vec<String>,
}

impl VersionRegistry {
    /// Registry of all known CUDA releases
    pub fn cuda() -> Self {
        Self::new(CUDA_VERSIONS.iter().map(|v| v.to_string()).collect())
    }

    /// Registry over an arbitrary ordered version list.
    /// The list must be strictly increasing in release order.
    pub fn new(versions: Vec<String>) -> Self {
        Self { versions }
    }

    /// All versions, oldest first
    pub fn all(&self) -> &[String] {
        &self.versions
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Position of a version in release order
    pub fn rank(&self, version: &str) -> Option<usize> {
        self.versions.iter().position(|v| v == version)
    }

    /// Newest known release
    pub fn latest(&self) -> Option<&str> {
        self.versions.last().map(String::as_str)
    }

    pub fn is_latest(&self, version: &str) -> bool {
        self.latest() == Some(version)
    }

    /// Resolve a user-supplied version token to a canonical entry.
    ///
    /// Exact match wins, then string prefix, then the dotted-numeric rule:
    /// the first version whose major equals the requested major and whose
    /// minor is at least the requested minor (any minor when only a major
    /// is given).
    pub fn resolve(&self, token: &str) -> Result<&str, TrackError> {
        if let Some(v) = self.versions.iter().find(|v| v.as_str() == token) {
            return Ok(v);
        }

        if let Some(v) = self.versions.iter().find(|v| v.starts_with(token)) {
            return Ok(v);
        }

        let requested = parse_dotted(token)
            .ok_or_else(|| TrackError::VersionNotFound(token.to_string()))?;

        for v in &self.versions {
            let Some(parts) = parse_dotted(v) else {
                continue;
            };
            if parts[0] != requested[0] {
                continue;
            }
            if requested.len() == 1 || parts.get(1) >= requested.get(1) {
                return Ok(v);
            }
        }

        Err(TrackError::VersionNotFound(token.to_string()))
    }

    /// Inclusive slice of versions between two resolved tokens.
    ///
    /// Defaults to the oldest known version for a missing `since` and the
    /// newest for a missing `until`. The result is non-empty and ordered
    /// by rank.
    pub fn range(
        &self,
        since: Option<&str>,
        until: Option<&str>,
    ) -> Result<&[String], TrackError> {
        let start = match since {
            Some(token) => {
                let resolved = self.resolve(token)?.to_string();
                self.rank(&resolved).unwrap_or(0)
            }
            None => 0,
        };

        let end = match until {
            Some(token) => {
                let resolved = self.resolve(token)?.to_string();
                self.rank(&resolved).unwrap_or(0) + 1
            }
            None => self.versions.len(),
        };

        if start >= end {
            return Err(TrackError::EmptyRange);
        }

        Ok(&self.versions[start..end])
    }
}

/// Parse a dotted numeric version token ("11", "11.2", "11.2.0")
fn parse_dotted(token: &str) -> Option<Vec<u64>> {
    token
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect()
}
