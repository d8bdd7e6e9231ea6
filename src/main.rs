use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use cuda_api_tracker::config;
use cuda_api_tracker::output::{self, OutputFormat};
use cuda_api_tracker::track::cache::SymbolCache;
use cuda_api_tracker::track::catalog::build_catalog;
use cuda_api_tracker::track::changelog::{build_changelog, diff_pair};
use cuda_api_tracker::track::fetcher::HttpFetcher;
use cuda_api_tracker::track::search::BoundarySearch;
use cuda_api_tracker::track::store::SymbolStore;
use cuda_api_tracker::track::types::ApiCategory;
use cuda_api_tracker::track::versions::VersionRegistry;

#[derive(Parser)]
#[command(name = "cuda-api-tracker")]
#[command(version, about = "Track CUDA API symbol lifecycles across toolkit releases")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Show detailed progress
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Bypass the local symbol cache
    #[arg(long, global = true)]
    no_cache: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Find when an API symbol was introduced and/or removed
    Search {
        /// Name of the CUDA API function to search for
        api_name: String,

        /// API type to search (auto-detected from the prefix when omitted)
        #[arg(long, value_enum)]
        api_type: Option<CategoryArg>,

        /// Check all versions instead of stopping at the boundary
        #[arg(long)]
        full_scan: bool,
    },

    /// List every API in a version range with lifecycle facts
    Catalog {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(long, value_enum, default_value = "both")]
        api_type: CategorySelect,

        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show version-by-version API additions and removals
    Changelog {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(long, value_enum, default_value = "both")]
        api_type: CategorySelect,

        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Diff the API surface of two versions
    Compare {
        v1: String,
        v2: String,

        #[arg(long, value_enum, default_value = "both")]
        api_type: CategorySelect,
    },

    /// Cache maintenance
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Args)]
struct RangeArgs {
    /// Starting CUDA version (default: oldest available)
    #[arg(long)]
    since: Option<String>,

    /// Ending CUDA version (default: latest)
    #[arg(long)]
    until: Option<String>,
}

#[derive(Subcommand)]
enum CacheAction {
    /// Remove all cached symbol sets
    Clear,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CategoryArg {
    Runtime,
    Driver,
}

impl From<CategoryArg> for ApiCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Runtime => ApiCategory::Runtime,
            CategoryArg::Driver => ApiCategory::Driver,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CategorySelect {
    Runtime,
    Driver,
    Both,
}

impl CategorySelect {
    fn categories(self) -> Vec<ApiCategory> {
        match self {
            CategorySelect::Runtime => vec![ApiCategory::Runtime],
            CategorySelect::Driver => vec![ApiCategory::Driver],
            CategorySelect::Both => vec![ApiCategory::Runtime, ApiCategory::Driver],
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let registry = Arc::new(VersionRegistry::cuda());
    let cache = SymbolCache::new(config::cache_dir());

    match cli.command {
        Command::Cache {
            action: CacheAction::Clear,
        } => {
            let dir = cache.dir().to_path_buf();
            if dir.exists() {
                cache.clear()?;
                println!("Cache cleared: {}", dir.display());
            } else {
                println!("No cache to clear.");
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Search {
            api_name,
            api_type,
            full_scan,
        } => {
            let store = build_store(cache, Arc::clone(&registry), cli.no_cache);

            let category = match api_type {
                Some(arg) => arg.into(),
                None => {
                    let detected = ApiCategory::detect(&api_name);
                    if detected == ApiCategory::Driver {
                        println!("(Auto-detected driver API based on 'cu' prefix)");
                    }
                    detected
                }
            };

            let result = BoundarySearch::new(&store, registry.as_ref())
                .full_scan(full_scan)
                .find_history(&api_name, category)
                .await;

            println!("{}", output::search::render_text(&result, registry.len()));

            if !result.found() && category == ApiCategory::Runtime {
                println!();
                println!("Tip: try searching the driver API:");
                println!("  cuda-api-tracker search {} --api-type driver", api_name);
            }

            Ok(if result.found() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Command::Catalog {
            range,
            api_type,
            format,
            output: output_path,
        } => {
            let store = build_store(cache, Arc::clone(&registry), cli.no_cache);
            let versions = registry.range(range.since.as_deref(), range.until.as_deref())?;
            let categories = api_type.categories();

            let sets = store.symbols_for_range(versions, &categories).await;
            let catalog = build_catalog(&categories, versions, &sets);

            write_output(
                output::catalog::render(&catalog, format),
                output_path.as_deref(),
            )?;
            Ok(ExitCode::SUCCESS)
        }

        Command::Changelog {
            range,
            api_type,
            format,
            output: output_path,
        } => {
            let store = build_store(cache, Arc::clone(&registry), cli.no_cache);
            let versions = registry.range(range.since.as_deref(), range.until.as_deref())?;
            let categories = api_type.categories();

            let sets = store.symbols_for_range(versions, &categories).await;
            let changelog = build_changelog(&categories, versions, &sets)?;

            write_output(
                output::changelog::render(&changelog, format),
                output_path.as_deref(),
            )?;
            Ok(ExitCode::SUCCESS)
        }

        Command::Compare { v1, v2, api_type } => {
            let store = build_store(cache, Arc::clone(&registry), cli.no_cache);
            let previous = registry.resolve(&v1)?.to_string();
            let current = registry.resolve(&v2)?.to_string();
            let categories = api_type.categories();

            let mut previous_set = BTreeSet::new();
            let mut current_set = BTreeSet::new();
            for &category in &categories {
                previous_set.extend(store.symbols(&previous, category).await);
                current_set.extend(store.symbols(&current, category).await);
            }

            let diff = diff_pair(&previous, &current, &previous_set, &current_set);
            println!("{}", output::changelog::render_compare_text(&diff));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_store(cache: SymbolCache, registry: Arc<VersionRegistry>, no_cache: bool) -> SymbolStore {
    SymbolStore::new(Arc::new(HttpFetcher::new()), cache, registry).use_cache(!no_cache)
}

fn write_output(rendered: String, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Output written to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
