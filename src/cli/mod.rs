// src/cli/mod.rs
mod args;
mod value_enum;

pub use args::{Args, Command, FilterArgs, OutputArgs};
pub use value_enum::{CliOutputFormat, CliPolicy};
use year_range_filter_domain::{FilterSettings, RangeFields, YearInterval};
use year_range_filter_infra::load_settings;
use year_range_filter_shared_kernel::{ErrorContext, PresentationError, Result};

/// Settings from `--config` (or defaults) with the command-line flags applied on top.
pub fn resolve_settings(filter: &FilterArgs) -> Result<FilterSettings> {
    let mut settings = match &filter.config {
        Some(path) => load_settings(path)?,
        None => FilterSettings::default(),
    };

    if filter.begin_field.is_some() || filter.end_field.is_some() {
        let begin = filter.begin_field.as_deref().unwrap_or(settings.fields.begin.as_str());
        let end = filter.end_field.as_deref().unwrap_or(settings.fields.end.as_str());
        settings.fields = RangeFields::parse(begin, end).context("Invalid field name")?;
    }

    settings.initial = YearInterval::new(
        filter.from.unwrap_or(settings.initial.from),
        filter.to.unwrap_or(settings.initial.to),
    );

    if let Some(policy) = filter.policy {
        settings.inverted_policy = policy.into();
    }

    validate_years(filter, &settings)?;
    Ok(settings)
}

/// Years given on the command line must lie inside the configured bounds.
fn validate_years(filter: &FilterArgs, settings: &FilterSettings) -> Result<()> {
    for (flag, year) in [("--from", filter.from), ("--to", filter.to)] {
        let Some(year) = year else { continue };
        if !settings.bounds.contains(year) {
            return Err(PresentationError::InvalidValue {
                flag: flag.to_string(),
                value: year.to_string(),
                reason: format!(
                    "must be between {} and {}",
                    settings.bounds.min, settings.bounds.max
                ),
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use year_range_filter_domain::InvertedRangePolicy;
    use year_range_filter_shared_kernel::{DomainError, YearFilterError};

    use super::*;

    #[test]
    fn defaults_without_flags() {
        let settings = resolve_settings(&FilterArgs::default()).unwrap();
        assert_eq!(settings, FilterSettings::default());
    }

    #[test]
    fn flags_override_defaults() {
        let filter = FilterArgs {
            from: Some(1700),
            end_field: Some("stop".into()),
            policy: Some(CliPolicy::Reject),
            ..FilterArgs::default()
        };
        let settings = resolve_settings(&filter).unwrap();
        assert_eq!(settings.initial, YearInterval::new(1700, 1900));
        assert_eq!(settings.fields.begin.as_str(), "beginjaar");
        assert_eq!(settings.fields.end.as_str(), "stop");
        assert_eq!(settings.inverted_policy, InvertedRangePolicy::Reject);
    }

    #[test]
    fn blank_field_is_rejected() {
        let filter = FilterArgs { begin_field: Some("  ".into()), ..FilterArgs::default() };
        let err = resolve_settings(&filter).unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::EmptyFieldName { .. })));
    }

    #[test]
    fn year_outside_bounds_is_rejected() {
        let filter = FilterArgs { to: Some(3500), ..FilterArgs::default() };
        let err = resolve_settings(&filter).unwrap_err();
        assert!(matches!(
            err.root(),
            YearFilterError::Presentation(PresentationError::InvalidValue { .. })
        ));
    }
}
