use std::path::PathBuf;

// =============================================================================
// Fetch-related constants
// =============================================================================

/// Per-request timeout for documentation fetches (30 seconds)
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Maximum attempts per URL before giving up and returning empty content
pub const FETCH_MAX_RETRIES: u32 = 3;

/// Concurrent version fetches during catalog/changelog range operations
pub const FETCH_CONCURRENCY: usize = 4;

/// Upper bound on module group pages crawled per documentation index
pub const GROUP_PAGE_LIMIT: usize = 20;

/// The NVIDIA docs server rejects requests without a browser-like agent
pub const FETCH_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

// =============================================================================
// Documentation URLs
// =============================================================================

/// Archived documentation, one subtree per toolkit release
pub const ARCHIVE_BASE_URL: &str = "https://docs.nvidia.com/cuda/archive";

/// Main documentation tree, where the newest release lives before archival
pub const LATEST_BASE_URL: &str = "https://docs.nvidia.com/cuda";

/// Returns the path to the symbol cache directory.
/// Uses $XDG_CACHE_HOME/cuda-api-tracker if XDG_CACHE_HOME is set,
/// otherwise falls back to ~/.cache/cuda-api-tracker,
/// or ./cuda-api-tracker if neither is available.
pub fn cache_dir() -> PathBuf {
    cache_dir_with_env(std::env::var("XDG_CACHE_HOME").ok(), dirs::home_dir())
}

fn cache_dir_with_env(xdg_cache_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let cache_dir = xdg_cache_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".cache")))
        .unwrap_or_else(|| PathBuf::from("."));

    cache_dir.join("cuda-api-tracker")
}
