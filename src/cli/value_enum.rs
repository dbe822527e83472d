// src/cli/value_enum.rs
use clap::ValueEnum;
use year_range_filter_domain::InvertedRangePolicy;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum CliOutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum CliPolicy {
    /// Warn and keep the bounds as given (matches nothing)
    Literal,
    /// Warn and swap the bounds
    Swap,
    /// Refuse to build the filter
    Reject,
}

impl From<CliPolicy> for InvertedRangePolicy {
    fn from(value: CliPolicy) -> Self {
        match value {
            CliPolicy::Literal => InvertedRangePolicy::Literal,
            CliPolicy::Swap => InvertedRangePolicy::Swap,
            CliPolicy::Reject => InvertedRangePolicy::Reject,
        }
    }
}
