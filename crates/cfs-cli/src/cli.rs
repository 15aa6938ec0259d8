//! CLI argument definitions for the frailty classifier.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use cfs_model::options::{DEFAULT_ACTIVE_MAX, DEFAULT_MIN_COMORBIDITIES};
use cfs_model::{ActivityScale, GroupScheme, MissingComparison, Scale};

#[derive(Parser)]
#[command(
    name = "cfs",
    version,
    about = "Clinical Frailty Scale classifier - score survey data on the CFS",
    long_about = "Score every subject of a CSV survey extract on the Clinical Frailty Scale.\n\n\
                  Maps dataset columns onto the canonical indicator battery, cleans them,\n\
                  derives the deficit counts and applies the priority-ordered decision table.\n\
                  Scores can be re-derived through an independent formula for checking."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify every row of a CSV file.
    Classify(ClassifyArgs),

    /// Re-derive scores of a classified CSV file and report disagreements.
    Validate(ValidateArgs),

    /// List the canonical indicators.
    Catalog,

    /// Print a decision table.
    Rules(RulesArgs),
}

/// Options shared by `classify` and `validate`.
#[derive(Args, Clone, Copy)]
pub struct ScoringArgs {
    /// Disease count at or above which a subject scores at least 4.
    #[arg(long = "min-comorbidities", value_name = "N", default_value_t = DEFAULT_MIN_COMORBIDITIES)]
    pub min_comorbidities: u32,

    /// Scale version to score against.
    #[arg(long = "scale", value_enum, default_value = "nine")]
    pub scale: ScaleArg,

    /// Count rows where both the score and the expectation are missing as passing.
    #[arg(long = "lenient-missing")]
    pub lenient_missing: bool,
}

impl ScoringArgs {
    pub fn missing_comparison(&self) -> MissingComparison {
        if self.lenient_missing {
            MissingComparison::Lenient
        } else {
            MissingComparison::Strict
        }
    }
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// CSV file with one subject per row.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Mapping file (JSON or TOML) from canonical id to column name.
    ///
    /// Without a mapping file or `--interactive`, columns are expected to be
    /// named by their canonical ids.
    #[arg(long = "mapping", value_name = "FILE", conflicts_with = "interactive")]
    pub mapping: Option<PathBuf>,

    /// Ask for the column of each indicator on the terminal.
    #[arg(long = "interactive")]
    pub interactive: bool,

    /// Custom decision table (JSON) replacing the built-in one for `--scale`.
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,

    #[command(flatten)]
    pub scoring: ScoringArgs,

    /// Coding of the raw physical activity column.
    #[arg(long = "activity-scale", value_enum, default_value = "binary")]
    pub activity_scale: ActivityScaleArg,

    /// Highest four-point activity answer still counted as active.
    #[arg(long = "activity-cutoff", value_name = "N", default_value_t = DEFAULT_ACTIVE_MAX)]
    pub activity_cutoff: i64,

    /// Add a `cfs_rule` column naming the rule that fired.
    #[arg(long = "record-rule")]
    pub record_rule: bool,

    /// Check the scores against the independent formula.
    #[arg(long = "validate")]
    pub validate: bool,

    /// Add `cfs_label` and `cfs_group` columns using this grouping.
    #[arg(long = "group", value_enum, value_name = "SCHEME")]
    pub group: Option<GroupArg>,

    /// Output CSV path (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write run statistics as JSON.
    #[arg(long = "stats", value_name = "FILE")]
    pub stats: Option<PathBuf>,
}

impl ClassifyArgs {
    pub fn activity(&self) -> ActivityScale {
        match self.activity_scale {
            ActivityScaleArg::Binary => ActivityScale::Binary,
            ActivityScaleArg::FourPoint => ActivityScale::FourPoint {
                active_max: self.activity_cutoff,
            },
        }
    }
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Classified CSV file carrying the count, indicator and score columns.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub scoring: ScoringArgs,

    /// Write the failing rows to this CSV file.
    #[arg(long = "failures", value_name = "FILE")]
    pub failures: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Built-in table to print.
    #[arg(long = "scale", value_enum, default_value = "nine")]
    pub scale: ScaleArg,

    /// Print a custom decision table (JSON) instead.
    #[arg(long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ScaleArg {
    /// Current 1-9 scale.
    Nine,
    /// Legacy 1-7 scale.
    Seven,
}

impl From<ScaleArg> for Scale {
    fn from(value: ScaleArg) -> Self {
        match value {
            ScaleArg::Nine => Scale::NinePoint,
            ScaleArg::Seven => Scale::SevenPoint,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ActivityScaleArg {
    Binary,
    FourPoint,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GroupArg {
    /// 1-4 non-frail, 5-9 frail.
    Two,
    /// 1-3 fit, 4-5 vulnerable, 6-9 frail.
    Three,
}

impl From<GroupArg> for GroupScheme {
    fn from(value: GroupArg) -> Self {
        match value {
            GroupArg::Two => GroupScheme::TwoGroup,
            GroupArg::Three => GroupScheme::ThreeGroup,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
