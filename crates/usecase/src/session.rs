// crates/usecase/src/session.rs
use std::sync::Arc;

use chrono::Local;
use year_range_filter_domain::{
    FilterSettings, PlannedFilter, RangeFields, RangeFilter, SubsetPredicate, YearInterval,
};
use year_range_filter_ports::{diagnostics::DiagnosticsSink, layers::FeatureLayer, layers::LayerRegistry};
use year_range_filter_shared_kernel::{ApplicationError, Result, YearFilterError};

use crate::dto::{ApplyOutcome, ResetOutcome};

/// State behind the year-filter dialog: one layer, two field names, one interval.
///
/// Opening fails when nothing is selected or the layer lacks the range fields,
/// so every later operation can assume a usable layer.
pub struct YearFilterSession<'a> {
    layer: Arc<dyn FeatureLayer>,
    diagnostics: &'a dyn DiagnosticsSink,
    settings: FilterSettings,
    interval: YearInterval,
}

impl<'a> YearFilterSession<'a> {
    /// Opens a session on the registry's active layer.
    pub fn open(
        registry: &dyn LayerRegistry,
        diagnostics: &'a dyn DiagnosticsSink,
        settings: FilterSettings,
    ) -> Result<Self> {
        let Some(layer) = registry.active_layer() else {
            diagnostics.warn("No layer selected");
            return Err(ApplicationError::MissingSelection.into());
        };
        Self::for_layer(layer, diagnostics, settings)
    }

    /// Opens a session on an explicit layer.
    pub fn for_layer(
        layer: Arc<dyn FeatureLayer>,
        diagnostics: &'a dyn DiagnosticsSink,
        settings: FilterSettings,
    ) -> Result<Self> {
        settings.validate()?;

        let name = layer.name();
        diagnostics.debug(&format!("Active layer: {name}"));

        let available = layer.field_names();
        let missing = settings.fields.missing_from(available.iter().map(String::as_str));
        diagnostics.debug(&format!("Layer fields: {}", available.join(", ")));
        if !missing.is_empty() {
            diagnostics.warn(&format!("Layer {name} missing required fields"));
            return Err(ApplicationError::MissingFields { layer: name, missing }.into());
        }

        let interval = settings.initial_interval();
        diagnostics.info(&format!("Year filter session opened on layer '{name}' ({interval})"));
        Ok(Self { layer, diagnostics, settings, interval })
    }

    pub fn fields(&self) -> &RangeFields {
        &self.settings.fields
    }

    pub fn interval(&self) -> YearInterval {
        self.interval
    }

    /// Sets the lower query bound, clamped to the year domain. Returns the stored value.
    pub fn set_from_year(&mut self, year: i64) -> i64 {
        self.interval.from = self.settings.bounds.clamp(year);
        self.interval.from
    }

    /// Sets the upper query bound, clamped to the year domain. Returns the stored value.
    pub fn set_to_year(&mut self, year: i64) -> i64 {
        self.interval.to = self.settings.bounds.clamp(year);
        self.interval.to
    }

    pub fn set_interval(&mut self, interval: YearInterval) -> YearInterval {
        self.interval = self.settings.bounds.clamp_interval(interval);
        self.interval
    }

    /// Replaces the field names. Only allowed when the settings mark them editable.
    ///
    /// The new names are not checked against the layer; a filter on absent
    /// fields simply matches nothing.
    pub fn set_fields(&mut self, fields: RangeFields) -> Result<()> {
        if !self.settings.fields_editable {
            return Err(ApplicationError::FieldsLocked.into());
        }
        self.diagnostics.debug(&format!("Fields set to '{}', '{}'", fields.begin, fields.end));
        self.settings.fields = fields;
        Ok(())
    }

    pub fn increase_range(&mut self) -> YearInterval {
        self.shift(1)
    }

    pub fn decrease_range(&mut self) -> YearInterval {
        self.shift(-1)
    }

    fn shift(&mut self, delta: i64) -> YearInterval {
        self.interval = self.interval.shifted(delta, self.settings.bounds);
        self.diagnostics.debug(&format!("New range: {}", self.interval));
        self.interval
    }

    /// The filter `apply` would install, without touching the layer.
    pub fn preview(&self) -> Result<PlannedFilter> {
        Ok(RangeFilter::plan(
            self.settings.fields.clone(),
            self.interval,
            self.settings.inverted_policy,
        )?)
    }

    /// Builds the predicate and installs it on the layer.
    pub fn apply(&self) -> Result<ApplyOutcome> {
        let name = self.layer.name();
        let planned = self.preview().inspect_err(|e| self.diagnostics.warn(&e.to_string()))?;
        if let Some(warning) = planned.warning {
            self.diagnostics.warn(&warning.to_string());
        }

        let fields = planned.filter.fields();
        self.diagnostics.info(&format!(
            "Applying filter to {name} - Properties: '{}', '{}'. Year range: {}",
            fields.begin,
            fields.end,
            planned.filter.interval()
        ));

        let predicate = planned.filter.predicate();
        self.diagnostics.debug(&format!("Filter expression: {predicate}"));

        let outcome = self
            .layer
            .set_subset_string(predicate.as_str())
            .map_err(|source| self.filter_failed(&name, source))?;

        if !outcome.skipped.is_zero() {
            self.diagnostics.warn(&format!(
                "{} features on layer '{name}' have non-numeric year values and were hidden",
                outcome.skipped
            ));
        }

        let applied = ApplyOutcome {
            layer: name,
            predicate,
            interval: planned.filter.interval(),
            matched: outcome.matched,
            skipped: outcome.skipped,
            warning: planned.warning,
            applied_at: Local::now(),
        };
        self.diagnostics.info(&applied.message());
        Ok(applied)
    }

    /// Removes any subset filter from the layer.
    pub fn reset(&self) -> Result<ResetOutcome> {
        let name = self.layer.name();
        self.diagnostics.debug("Reset filter called.");
        let outcome = self
            .layer
            .set_subset_string(SubsetPredicate::cleared().as_str())
            .map_err(|source| self.filter_failed(&name, source))?;

        let reset = ResetOutcome { layer: name, visible: outcome.matched };
        self.diagnostics.info(&reset.message());
        Ok(reset)
    }

    fn filter_failed(&self, layer: &str, source: YearFilterError) -> YearFilterError {
        let reason = source.to_string();
        self.diagnostics.error(&format!("Error applying filter to layer {layer}: {reason}"));
        ApplicationError::FilterFailed {
            layer: layer.to_string(),
            reason,
            source: Some(Box::new(source)),
        }
        .into()
    }
}
