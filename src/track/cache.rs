//! Filesystem cache of per-(category, version) symbol sets
//!
//! One JSON file per key, holding a sorted array of symbol names. Entries
//! never expire; the only invalidation is [`SymbolCache::clear`]. Writes
//! are idempotent because a key always derives the same set, so concurrent
//! duplicate writes are wasteful but harmless.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::track::error::CacheError;
use crate::track::types::ApiCategory;

pub struct SymbolCache {
    dir: PathBuf,
}

impl SymbolCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    /// Load the cached symbol set for a key, or `None` if absent
    pub fn load(
        &self,
        category: ApiCategory,
        version: &str,
    ) -> Result<Option<BTreeSet<String>>, CacheError> {
        let path = self.entry_path(category, version);
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&path)?;
        let symbols: Vec<String> = serde_json::from_str(&data)?;

        debug!(
            "Loaded {} cached symbols for {}/{}",
            symbols.len(),
            category.as_str(),
            version
        );
        Ok(Some(symbols.into_iter().collect()))
    }

    /// Persist the symbol set for a key, sorted for stable diffs
    pub fn store(
        &self,
        category: ApiCategory,
        version: &str,
        symbols: &BTreeSet<String>,
    ) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.entry_path(category, version);
        fs::write(&path, serde_json::to_string(symbols)?)?;

        debug!(
            "Cached {} symbols for {}/{} at {:?}",
            symbols.len(),
            category.as_str(),
            version,
            path
        );
        Ok(())
    }

    /// Remove every persisted entry
    pub fn clear(&self) -> Result<(), CacheError> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)?;
        }
        Ok(())
    }

    fn entry_path(&self, category: ApiCategory, version: &str) -> PathBuf {
        self.dir
            .join(format!("{}_{}.json", category.as_str(), version.replace('.', "_")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn symbol_set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn store_then_load_round_trips_the_set() {
        let temp_dir = TempDir::new().unwrap();
        let cache = SymbolCache::new(temp_dir.path());

        let symbols = symbol_set(&["cudaMalloc", "cudaFree", "cudaMemcpy"]);
        cache
            .store(ApiCategory::Runtime, "12.0.0", &symbols)
            .unwrap();

        let loaded = cache.load(ApiCategory::Runtime, "12.0.0").unwrap();
        assert_eq!(loaded, Some(symbols));
    }

    #[test]
    fn load_returns_none_for_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let cache = SymbolCache::new(temp_dir.path());

        let loaded = cache.load(ApiCategory::Runtime, "12.0.0").unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn keys_are_disjoint_across_categories() {
        let temp_dir = TempDir::new().unwrap();
        let cache = SymbolCache::new(temp_dir.path());

        cache
            .store(ApiCategory::Runtime, "12.0.0", &symbol_set(&["cudaMalloc"]))
            .unwrap();

        let driver = cache.load(ApiCategory::Driver, "12.0.0").unwrap();
        assert_eq!(driver, None);
    }

    #[test]
    fn entries_are_written_as_sorted_json_arrays() {
        let temp_dir = TempDir::new().unwrap();
        let cache = SymbolCache::new(temp_dir.path());

        cache
            .store(
                ApiCategory::Driver,
                "11.8.0",
                &symbol_set(&["cuMemFree", "cuCtxCreate", "cuStreamCreate"]),
            )
            .unwrap();

        let path = temp_dir.path().join("driver_11_8_0.json");
        let raw = std::fs::read_to_string(path).unwrap();
        assert_eq!(raw, r#"["cuCtxCreate","cuMemFree","cuStreamCreate"]"#);
    }

    #[test]
    fn load_rejects_malformed_entries() {
        let temp_dir = TempDir::new().unwrap();
        let cache = SymbolCache::new(temp_dir.path());

        std::fs::write(temp_dir.path().join("runtime_12_0_0.json"), "not json").unwrap();

        let result = cache.load(ApiCategory::Runtime, "12.0.0");
        assert!(matches!(result, Err(CacheError::Malformed(_))));
    }

    #[test]
    fn clear_removes_all_entries() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("cache");
        let cache = SymbolCache::new(&dir);

        cache
            .store(ApiCategory::Runtime, "12.0.0", &symbol_set(&["cudaMalloc"]))
            .unwrap();
        assert!(dir.exists());

        cache.clear().unwrap();
        assert!(!dir.exists());

        // Clearing an already-empty cache is not an error
        cache.clear().unwrap();
    }
}
