//! Named regions of the dataset's region tree
//!
//! Regions are identified by a hierarchical path such as
//! `Regions/sample 1/cell_roi`. The pipeline works on a flattened list and
//! never walks the tree itself.

use crate::spot::SpotId;

/// Separator between path segments of a region name
pub const REGION_PATH_SEPARATOR: char = '/';

/// Name of the top-level region holding every spot of the dataset
pub const ROOT_REGION_NAME: &str = "Regions";

/// A named region and the ids of its member spots
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Region {
    /// Full hierarchical name
    pub name: String,
    /// Member spot ids
    pub spots: Vec<SpotId>,
}

impl Region {
    /// Create a new region
    pub fn new(name: impl Into<String>, spots: Vec<SpotId>) -> Self {
        Self {
            name: name.into(),
            spots,
        }
    }

    /// Last segment of the hierarchical name
    ///
    /// ```
    /// use spotseg_core::Region;
    ///
    /// let region = Region::new("Regions/sample/cell_roi", vec![]);
    /// assert_eq!(region.short_name(), "cell_roi");
    /// ```
    pub fn short_name(&self) -> &str {
        short_name(&self.name)
    }

    /// Whether `query` names this region
    ///
    /// A plain query must equal the last path segment. A query that itself
    /// contains separators must equal a trailing run of whole segments.
    pub fn matches(&self, query: &str) -> bool {
        if !query.contains(REGION_PATH_SEPARATOR) {
            return self.short_name() == query;
        }
        if self.name == query {
            return true;
        }
        self.name
            .strip_suffix(query)
            .is_some_and(|head| head.ends_with(REGION_PATH_SEPARATOR))
    }

    /// Number of member spots
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// Whether the region has no member spots
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }
}

/// Last `/`-separated segment of a region path
pub fn short_name(path: &str) -> &str {
    path.rsplit(REGION_PATH_SEPARATOR).next().unwrap_or(path)
}
