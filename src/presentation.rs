// src/presentation.rs
use std::fmt::Write;

use serde::Serialize;
use year_range_filter_domain::{RangeWarning, SubsetPredicate, YearInterval};
use year_range_filter_infra::Feature;
use year_range_filter_shared_kernel::{PresentationError, PresentationResult};
use year_range_filter_usecase::ApplyOutcome;

use crate::cli::CliOutputFormat;

/// Result of evaluating a layer's features directly, without a subset string.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub layer: String,
    pub predicate: SubsetPredicate,
    pub interval: YearInterval,
    pub matched: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<RangeWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<Feature>>,
}

#[derive(Serialize)]
struct ApplyReport<'a> {
    #[serde(flatten)]
    outcome: &'a ApplyOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    features: Option<&'a [Feature]>,
}

#[derive(Serialize)]
struct FieldsReport<'a> {
    layer: &'a str,
    fields: &'a [String],
}

pub fn render_apply(
    outcome: &ApplyOutcome,
    features: Option<&[Feature]>,
    format: CliOutputFormat,
) -> PresentationResult<String> {
    match format {
        CliOutputFormat::Json => to_json(&ApplyReport { outcome, features }),
        CliOutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "{}", outcome.message()).map_err(render_failed)?;
            writeln!(out, "predicate: {}", outcome.predicate).map_err(render_failed)?;
            if !outcome.skipped.is_zero() {
                writeln!(out, "skipped: {} (non-numeric year values)", outcome.skipped)
                    .map_err(render_failed)?;
            }
            if let Some(warning) = &outcome.warning {
                writeln!(out, "warning: {warning}").map_err(render_failed)?;
            }
            write_features(&mut out, features)?;
            Ok(out)
        }
    }
}

pub fn render_check(report: &CheckReport, format: CliOutputFormat) -> PresentationResult<String> {
    match format {
        CliOutputFormat::Json => to_json(report),
        CliOutputFormat::Text => {
            let mut out = String::new();
            writeln!(
                out,
                "{} of {} features on layer '{}' overlap {}.",
                report.matched, report.total, report.layer, report.interval
            )
            .map_err(render_failed)?;
            writeln!(out, "predicate: {}", report.predicate).map_err(render_failed)?;
            if let Some(warning) = &report.warning {
                writeln!(out, "warning: {warning}").map_err(render_failed)?;
            }
            write_features(&mut out, report.features.as_deref())?;
            Ok(out)
        }
    }
}

pub fn render_fields(layer: &str, fields: &[String], format: CliOutputFormat) -> PresentationResult<String> {
    match format {
        CliOutputFormat::Json => to_json(&FieldsReport { layer, fields }),
        CliOutputFormat::Text => Ok(fields.iter().fold(String::new(), |mut out, field| {
            out.push_str(field);
            out.push('\n');
            out
        })),
    }
}

fn write_features(out: &mut String, features: Option<&[Feature]>) -> PresentationResult<()> {
    for feature in features.unwrap_or_default() {
        let attributes = feature
            .attributes
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "  #{} {attributes}", feature.id).map_err(render_failed)?;
    }
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> PresentationResult<String> {
    let mut json = serde_json::to_string_pretty(value).map_err(render_failed)?;
    json.push('\n');
    Ok(json)
}

fn render_failed(err: impl std::fmt::Display) -> PresentationError {
    PresentationError::RenderFailed(err.to_string())
}
