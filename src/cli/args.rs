// src/cli/args.rs
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use super::value_enum::{CliOutputFormat, CliPolicy};

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "year_range_filter",
    version = crate::VERSION,
    about = "Show only the features whose begin/end years overlap a chosen interval"
)]
pub struct Args {
    /// Raise log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the subset string for a year interval
    Predicate {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Install the year filter on a layer file and report how many features match
    Apply {
        /// GeoJSON FeatureCollection or JSON array of attribute objects
        #[arg(value_hint = ValueHint::FilePath)]
        layer: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Evaluate every feature directly; non-integer year values are errors
    Check {
        #[arg(value_hint = ValueHint::FilePath)]
        layer: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the attribute names of a layer file
    Fields {
        #[arg(value_hint = ValueHint::FilePath)]
        layer: PathBuf,

        #[arg(long, value_enum, default_value = "text", help_heading = "Output")]
        format: CliOutputFormat,
    },
}

/// Flags that shape the filter; each overrides the settings file.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// First year of the interval
    #[arg(long, allow_negative_numbers = true, help_heading = "Filter")]
    pub from: Option<i64>,

    /// Last year of the interval
    #[arg(long, allow_negative_numbers = true, help_heading = "Filter")]
    pub to: Option<i64>,

    /// Attribute holding the first year of a feature
    #[arg(long, help_heading = "Filter")]
    pub begin_field: Option<String>,

    /// Attribute holding the last year of a feature
    #[arg(long, help_heading = "Filter")]
    pub end_field: Option<String>,

    /// What to do when --from is after --to
    #[arg(long, value_enum, help_heading = "Filter")]
    pub policy: Option<CliPolicy>,

    /// Settings file (.json, .yaml, .yml)
    #[arg(long, value_hint = ValueHint::FilePath, help_heading = "Filter")]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value = "text", help_heading = "Output")]
    pub format: CliOutputFormat,

    /// Also print the matching features
    #[arg(long, help_heading = "Output")]
    pub list: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn apply_accepts_filter_and_output_flags() {
        let args = Args::try_parse_from([
            "year_range_filter",
            "-vv",
            "apply",
            "percelen.geojson",
            "--from",
            "1900",
            "--to",
            "1842",
            "--policy",
            "swap",
            "--format",
            "json",
            "--list",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        match args.command {
            Command::Apply { layer, filter, output } => {
                assert_eq!(layer, PathBuf::from("percelen.geojson"));
                assert_eq!(filter.from, Some(1900));
                assert_eq!(filter.to, Some(1842));
                assert!(matches!(filter.policy, Some(CliPolicy::Swap)));
                assert!(matches!(output.format, CliOutputFormat::Json));
                assert!(output.list);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn negative_years_parse() {
        let args =
            Args::try_parse_from(["year_range_filter", "predicate", "--from", "-50", "--to", "10"]).unwrap();
        match args.command {
            Command::Predicate { filter } => assert_eq!(filter.from, Some(-50)),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
