//! Common types for the tracking layer

use serde::Serialize;

/// CUDA API family a symbol belongs to.
///
/// The two families live in disjoint documentation trees and follow
/// disjoint naming conventions: runtime entry points are `cuda`-prefixed
/// (`cudaMalloc`), driver entry points are `cu`-prefixed (`cuMemAlloc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiCategory {
    /// Runtime API (cuda* symbols)
    Runtime,
    /// Driver API (cu* symbols)
    Driver,
}

impl ApiCategory {
    /// Returns the string representation of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiCategory::Runtime => "runtime",
            ApiCategory::Driver => "driver",
        }
    }

    /// Documentation subtree for this category
    pub fn doc_slug(&self) -> &'static str {
        match self {
            ApiCategory::Runtime => "cuda-runtime-api",
            ApiCategory::Driver => "cuda-driver-api",
        }
    }

    /// Guess the category from a symbol's prefix.
    ///
    /// `cu`-prefixed names that are not `cuda`-prefixed belong to the
    /// driver API; everything else is treated as runtime.
    pub fn detect(symbol: &str) -> ApiCategory {
        if symbol.starts_with("cu") && !symbol.starts_with("cuda") {
            ApiCategory::Driver
        } else {
            ApiCategory::Runtime
        }
    }
}

impl std::str::FromStr for ApiCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "runtime" => Ok(ApiCategory::Runtime),
            "driver" => Ok(ApiCategory::Driver),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cudaMalloc", ApiCategory::Runtime)]
    #[case("cudaStreamGetDevice", ApiCategory::Runtime)]
    #[case("cuMemAlloc", ApiCategory::Driver)]
    #[case("cuStreamCreate", ApiCategory::Driver)]
    #[case("somethingElse", ApiCategory::Runtime)]
    fn detect_uses_prefix_heuristic(#[case] symbol: &str, #[case] expected: ApiCategory) {
        assert_eq!(ApiCategory::detect(symbol), expected);
    }

    #[test]
    fn as_str_round_trips_through_from_str() {
        for category in [ApiCategory::Runtime, ApiCategory::Driver] {
            assert_eq!(category.as_str().parse::<ApiCategory>(), Ok(category));
        }
        assert_eq!("both".parse::<ApiCategory>(), Err(()));
    }
}
