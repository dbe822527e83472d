// crates/ports/src/layers.rs
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use year_range_filter_shared_kernel::{FeatureCount, LayerId, Result};

/// Result of installing a subset string on a layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsetOutcome {
    /// Features visible under the new subset.
    pub matched: FeatureCount,
    /// Features hidden because an attribute could not be coerced for comparison.
    pub skipped: FeatureCount,
}

/// A host layer whose features can be restricted by a subset string.
pub trait FeatureLayer: Send + Sync {
    fn id(&self) -> LayerId;

    fn name(&self) -> String;

    /// Names of the attributes declared by the layer.
    fn field_names(&self) -> Vec<String>;

    /// Currently installed subset string; empty when unfiltered.
    fn subset_string(&self) -> String;

    /// Installs `expression` (empty clears the filter) and reports what is visible.
    fn set_subset_string(&self, expression: &str) -> Result<SubsetOutcome>;

    /// Features visible under the current subset.
    fn feature_count(&self) -> FeatureCount;

    /// All features regardless of the subset.
    fn total_count(&self) -> FeatureCount;
}

/// Host collection of layers with a notion of the active one.
pub trait LayerRegistry: Send + Sync {
    fn active_layer(&self) -> Option<Arc<dyn FeatureLayer>>;

    fn layer(&self, id: &LayerId) -> Option<Arc<dyn FeatureLayer>>;

    fn layers(&self) -> Vec<Arc<dyn FeatureLayer>>;
}
