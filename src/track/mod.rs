//! Symbol tracking layer: fetching, caching, and diffing per-version API
//! symbol sets from the CUDA documentation archive.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Fetcher   │────▶│    Store    │◀────│   Search    │
//! │  (HTTP)     │     │ (per-key    │     │ (boundary   │
//! └─────────────┘     │  symbol     │     │  walk)      │
//!        │            │  sets)      │     └─────────────┘
//!        ▼            └─────────────┘            │
//! ┌─────────────┐            │            ┌─────────────┐
//! │   Extract   │            ▼            │  Catalog /  │
//! │ (HTML→names)│     ┌─────────────┐     │  Changelog  │
//! └─────────────┘     │    Cache    │     │  (set ops)  │
//!                     │ (JSON files)│     └─────────────┘
//!                     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`versions`]: immutable ordered registry of known releases + resolver
//! - [`fetcher`]: page fetching with bounded retries, empty-on-failure
//! - [`extract`]: symbol name extraction from documentation HTML
//! - [`cache`]: filesystem cache of per-(category, version) symbol sets
//! - [`store`]: mediates fetcher, extractor, and cache per key
//! - [`search`]: backward boundary search for one symbol's lifecycle
//! - [`catalog`]: full lifecycle catalog over a version range
//! - [`changelog`]: consecutive-pair diffs and net change summary
//! - [`error`]: error types for resolution and cache operations
//! - [`types`]: common types like `ApiCategory`

pub mod cache;
pub mod catalog;
pub mod changelog;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod search;
pub mod store;
pub mod types;
pub mod versions;
