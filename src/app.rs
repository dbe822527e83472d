// src/app.rs
use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use year_range_filter_domain::{FilterSettings, PlannedFilter, RangeFilter};
use year_range_filter_infra::{LogDiagnostics, MemoryLayer, MemoryProject, load_layer};
use year_range_filter_ports::{diagnostics::DiagnosticsSink, layers::FeatureLayer};
use year_range_filter_usecase::YearFilterSession;

use crate::{
    cli::{Args, Command, FilterArgs, OutputArgs, resolve_settings},
    presentation::{self, CheckReport},
};

/// Runs one command and returns what should be printed on stdout.
pub fn run(args: Args) -> Result<String> {
    let diagnostics = LogDiagnostics;
    match args.command {
        Command::Predicate { filter } => predicate(&filter, &diagnostics),
        Command::Apply { layer, filter, output } => apply(&layer, &filter, &output, &diagnostics),
        Command::Check { layer, filter, output } => check(&layer, &filter, &output, &diagnostics),
        Command::Fields { layer, format } => {
            let layer = open_layer(&layer)?;
            Ok(presentation::render_fields(&layer.name(), &layer.field_names(), format)?)
        }
    }
}

fn predicate(filter: &FilterArgs, diagnostics: &dyn DiagnosticsSink) -> Result<String> {
    let settings = resolve_settings(filter)?;
    let planned = planned_filter(settings)?;
    if let Some(warning) = planned.warning {
        diagnostics.warn(&warning.to_string());
    }
    Ok(format!("{}\n", planned.filter.predicate()))
}

fn apply(
    path: &Path,
    filter: &FilterArgs,
    output: &OutputArgs,
    diagnostics: &dyn DiagnosticsSink,
) -> Result<String> {
    let settings = resolve_settings(filter)?;
    let layer = Arc::new(open_layer(path)?.with_diagnostics(Arc::new(LogDiagnostics)));

    let mut project = MemoryProject::new();
    let id = project.add_layer(layer.clone());
    project.set_active(&id)?;

    let session = YearFilterSession::open(&project, diagnostics, settings)?;
    let outcome = session.apply()?;
    let listed = output.list.then(|| layer.visible_features());
    Ok(presentation::render_apply(&outcome, listed.as_deref(), output.format)?)
}

fn check(
    path: &Path,
    filter: &FilterArgs,
    output: &OutputArgs,
    diagnostics: &dyn DiagnosticsSink,
) -> Result<String> {
    let settings = resolve_settings(filter)?;
    let layer = open_layer(path)?;

    let planned = planned_filter(settings)?;
    if let Some(warning) = planned.warning {
        diagnostics.warn(&warning.to_string());
    }

    let selected = planned
        .filter
        .select(layer.features())
        .with_context(|| format!("failed to evaluate layer '{}'", layer.name()))?;

    let report = CheckReport {
        layer: layer.name(),
        predicate: planned.filter.predicate(),
        interval: planned.filter.interval(),
        matched: selected.len(),
        total: layer.features().len(),
        warning: planned.warning,
        features: output.list.then(|| selected.into_iter().cloned().collect()),
    };
    Ok(presentation::render_check(&report, output.format)?)
}

/// The filter a session on these settings would apply: the initial interval is
/// pulled into the configured bounds first.
fn planned_filter(settings: FilterSettings) -> Result<PlannedFilter> {
    let interval = settings.initial_interval();
    Ok(RangeFilter::plan(settings.fields, interval, settings.inverted_policy)?)
}

fn open_layer(path: &Path) -> Result<MemoryLayer> {
    load_layer(path).with_context(|| format!("failed to load layer '{}'", path.display()))
}
