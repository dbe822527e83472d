// crates/infra/src/layer.rs
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use year_range_filter_domain::{AttributeMap, AttributeValue, Record};
use year_range_filter_ports::{
    diagnostics::{DiagnosticsSink, NullDiagnostics},
    layers::{FeatureLayer, SubsetOutcome},
};
use year_range_filter_shared_kernel::{DomainResult, FeatureCount, LayerId, Result};

use crate::subset::{CompiledSubset, Verdict};

/// One feature of an in-memory layer. Geometry is not modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: u64,
    pub attributes: AttributeMap,
}

impl Feature {
    pub fn new(id: u64, attributes: AttributeMap) -> Self {
        Self { id, attributes }
    }

    pub fn attribute(&self, field: &str) -> Option<&AttributeValue> {
        self.attributes.get(field)
    }
}

impl Record for Feature {
    fn optional_int(&self, field: &str) -> DomainResult<Option<i64>> {
        self.attributes.optional_int(field)
    }
}

#[derive(Debug)]
struct SubsetState {
    subset: CompiledSubset,
    visible: Vec<usize>,
    skipped: usize,
}

/// Host layer held fully in memory.
///
/// The subset string is compiled when installed; an expression that fails to
/// compile is rejected and the previous subset stays in force.
pub struct MemoryLayer {
    id: LayerId,
    name: String,
    fields: Vec<String>,
    features: Vec<Feature>,
    state: RwLock<SubsetState>,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl MemoryLayer {
    /// Creates a layer. When `fields` is empty the schema is the union of the
    /// features' attribute names in first-seen order.
    pub fn new(
        id: impl Into<LayerId>,
        name: impl Into<String>,
        fields: Vec<String>,
        features: Vec<Feature>,
    ) -> Self {
        let fields = if fields.is_empty() { infer_fields(&features) } else { fields };
        let visible = (0..features.len()).collect();
        Self {
            id: id.into(),
            name: name.into(),
            fields,
            features,
            state: RwLock::new(SubsetState { subset: CompiledSubset::unfiltered(), visible, skipped: 0 }),
            diagnostics: Arc::new(NullDiagnostics),
        }
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Features passing the current subset, in layer order.
    pub fn visible_features(&self) -> Vec<Feature> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.visible.iter().map(|&i| self.features[i].clone()).collect()
    }

    fn install(&self, subset: CompiledSubset) -> SubsetOutcome {
        let mut visible = Vec::new();
        let mut skipped = 0;
        for (index, feature) in self.features.iter().enumerate() {
            match subset.evaluate(&feature.attributes) {
                Verdict::Match => visible.push(index),
                Verdict::NoMatch => {}
                Verdict::Malformed { reason } => {
                    skipped += 1;
                    self.diagnostics.debug(&format!(
                        "Feature {} on layer '{}' skipped: {reason}",
                        feature.id, self.name
                    ));
                }
            }
        }

        let outcome = SubsetOutcome {
            matched: FeatureCount::new(visible.len()),
            skipped: FeatureCount::new(skipped),
        };
        *self.state.write().unwrap_or_else(PoisonError::into_inner) =
            SubsetState { subset, visible, skipped };
        outcome
    }
}

impl FeatureLayer for MemoryLayer {
    fn id(&self) -> LayerId {
        self.id.clone()
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn field_names(&self) -> Vec<String> {
        self.fields.clone()
    }

    fn subset_string(&self) -> String {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.subset.expression().to_string()
    }

    fn set_subset_string(&self, expression: &str) -> Result<SubsetOutcome> {
        let subset = CompiledSubset::compile(expression)?;
        self.diagnostics.debug(&format!(
            "Layer '{}' subset compiled to: {}",
            self.name,
            subset.translated()
        ));
        Ok(self.install(subset))
    }

    fn feature_count(&self) -> FeatureCount {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        FeatureCount::new(state.visible.len())
    }

    fn total_count(&self) -> FeatureCount {
        FeatureCount::new(self.features.len())
    }
}

impl std::fmt::Debug for MemoryLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("MemoryLayer")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("features", &self.features.len())
            .field("subset", &state.subset.expression())
            .field("visible", &state.visible.len())
            .field("skipped", &state.skipped)
            .finish()
    }
}

fn infer_fields(features: &[Feature]) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for feature in features {
        for key in feature.attributes.keys() {
            if !fields.iter().any(|f| f == key) {
                fields.push(key.clone());
            }
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use year_range_filter_domain::{RangeFields, RangeFilter, YearInterval};

    use super::*;
    use crate::diagnostics::MemoryDiagnostics;

    fn feature(id: u64, begin: Option<i64>, end: AttributeValue) -> Feature {
        let mut attributes = AttributeMap::new();
        attributes.insert("beginjaar".into(), begin.into());
        attributes.insert("eindjaar".into(), end);
        Feature::new(id, attributes)
    }

    fn percelen() -> MemoryLayer {
        MemoryLayer::new(
            "percelen_1",
            "percelen",
            Vec::new(),
            vec![
                feature(1, Some(1820), 1845.into()),
                feature(2, Some(1850), 1880.into()),
                feature(3, Some(1901), 1950.into()),
                feature(4, None, 1870.into()),
                feature(5, Some(1700), 2000.into()),
            ],
        )
    }

    const REFERENCE: &str = r#""beginjaar" <= 1900 AND "eindjaar" >= 1842"#;

    #[test]
    fn schema_is_inferred_from_attributes() {
        assert_eq!(percelen().field_names(), vec!["beginjaar".to_string(), "eindjaar".to_string()]);
    }

    #[test]
    fn applying_reference_predicate_counts_overlaps() {
        let layer = percelen();
        let outcome = layer.set_subset_string(REFERENCE).unwrap();
        assert_eq!(outcome.matched, 3usize);
        assert!(outcome.skipped.is_zero());
        assert_eq!(layer.feature_count(), 3usize);
        assert_eq!(layer.total_count(), 5usize);
        let ids: Vec<u64> = layer.visible_features().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2, 5]);
    }

    #[test]
    fn host_path_agrees_with_direct_evaluation() {
        let layer = percelen();
        let filter = RangeFilter::new(RangeFields::default(), YearInterval::new(1842, 1900));
        let direct = filter.count(layer.features()).unwrap();
        let hosted = layer.set_subset_string(filter.predicate().as_str()).unwrap();
        assert_eq!(hosted.matched, direct);

        // Every record the direct path rejects is skipped, never silently hidden.
        let malformed = [
            ("beginjaar", AttributeValue::Real(1850.5), "eindjaar", AttributeValue::Int(1870)),
            ("beginjaar", AttributeValue::from("1850.0"), "eindjaar", AttributeValue::Int(1870)),
            ("beginjaar", AttributeValue::from("onbekend"), "eindjaar", AttributeValue::Null),
        ];
        for (id, (begin_field, begin, end_field, end)) in (1..).zip(malformed) {
            let mut attributes = AttributeMap::new();
            attributes.insert(begin_field.into(), begin);
            attributes.insert(end_field.into(), end);
            let feature = Feature::new(id, attributes);
            assert!(filter.matches(&feature).is_err(), "feature {id} accepted directly");

            let single = MemoryLayer::new("m", "m", Vec::new(), vec![feature]);
            let outcome = single.set_subset_string(filter.predicate().as_str()).unwrap();
            assert!(outcome.matched.is_zero(), "feature {id} matched on the host");
            assert_eq!(outcome.skipped, 1usize, "feature {id} not counted as skipped");
        }
    }

    #[test]
    fn same_predicate_twice_is_idempotent() {
        let layer = percelen();
        let first = layer.set_subset_string(REFERENCE).unwrap();
        let first_ids: Vec<u64> = layer.visible_features().iter().map(|f| f.id).collect();
        let second = layer.set_subset_string(REFERENCE).unwrap();
        let second_ids: Vec<u64> = layer.visible_features().iter().map(|f| f.id).collect();
        assert_eq!(first, second);
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn empty_subset_clears_filter() {
        let layer = percelen();
        layer.set_subset_string(REFERENCE).unwrap();
        let cleared = layer.set_subset_string("").unwrap();
        assert_eq!(cleared.matched, 5usize);
        assert_eq!(layer.subset_string(), "");
    }

    #[test]
    fn unknown_fields_match_nothing() {
        let layer = percelen();
        let outcome = layer
            .set_subset_string(r#""custom_begin" <= 1900 AND "custom_end" >= 1842"#)
            .unwrap();
        assert!(outcome.matched.is_zero());
        assert!(outcome.skipped.is_zero());
    }

    #[test]
    fn malformed_values_are_skipped_and_logged() {
        let diagnostics = Arc::new(MemoryDiagnostics::new());
        let layer = MemoryLayer::new(
            "l",
            "l",
            Vec::new(),
            vec![feature(1, Some(1850), "onbekend".into()), feature(2, Some(1850), 1860.into())],
        )
        .with_diagnostics(diagnostics.clone());

        let outcome = layer.set_subset_string(REFERENCE).unwrap();
        assert_eq!(outcome.matched, 1usize);
        assert_eq!(outcome.skipped, 1usize);
        assert!(diagnostics.entries().iter().any(|(_, m)| m.contains("Feature 1")));
    }

    #[test]
    fn invalid_expression_keeps_previous_subset() {
        let layer = percelen();
        layer.set_subset_string(REFERENCE).unwrap();
        assert!(layer.set_subset_string(r#""beginjaar" <= AND"#).is_err());
        assert_eq!(layer.subset_string(), REFERENCE);
        assert_eq!(layer.feature_count(), 3usize);
    }
}
