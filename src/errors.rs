//! Submodule defining the errors and diagnostics used across the crate.

use alloc::string::String;

use crate::decoder::Label;

/// Errors raised while decoding a single benchmark name.
///
/// A decode error only affects the record it was raised for: the pipeline
/// collects it as a skipped record and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The name has no size separator, or the trailing segment is not a
    /// non-negative integer.
    #[error("Malformed size parameter in benchmark name `{0}`")]
    MalformedSize(String),

    /// The name prefix has fewer fields than the grammar requires.
    #[error("Benchmark name `{name}` has {found} fields, the grammar requires at least {required}")]
    MalformedDimensions {
        /// The offending benchmark name.
        name: String,
        /// Number of fields found in the prefix.
        found: usize,
        /// Minimum number of fields required by the grammar.
        required: usize,
    },

    /// A required field of the name prefix is present but empty.
    #[error("Benchmark name `{name}` has an empty field at position {position} for dimension `{dimension}`")]
    EmptyField {
        /// The offending benchmark name.
        name: String,
        /// Dimension reading the empty field.
        dimension: String,
        /// Position of the empty field in the prefix.
        position: usize,
    },
}

/// Errors found while validating a [`NameGrammar`](crate::NameGrammar).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// The grammar declares no dimensions.
    #[error("Grammar `{0}` declares no dimensions")]
    NoDimensions(String),

    /// A dimension has an empty name.
    #[error("Dimension at index {0} has an empty name")]
    EmptyDimensionName(usize),

    /// Two dimensions share the same name.
    #[error("Dimension `{0}` is declared more than once")]
    DuplicateDimension(String),

    /// A dimension does not reference any field position.
    #[error("Dimension `{0}` does not reference any field position")]
    NoPositions(String),

    /// Two dimensions read the same field position.
    #[error("Field position {position} is used by both `{first}` and `{second}`")]
    SharedPosition {
        /// The contested position.
        position: usize,
        /// The dimension declared first.
        first: String,
        /// The dimension declared second.
        second: String,
    },

    /// The size separator and the field separator are the same character.
    #[error("Size separator and field separator are both `{0}`")]
    AmbiguousSeparators(char),

    /// A required dimension reads a position that lies after an optional one,
    /// so a short name could never satisfy it.
    #[error("Required dimension `{dimension}` reads position {position} after optional position {optional}")]
    RequiredAfterOptional {
        /// The required dimension.
        dimension: String,
        /// The position it reads.
        position: usize,
        /// The first optional position.
        optional: usize,
    },

    /// A label table entry references a dimension the grammar does not declare.
    #[error("Label table references unknown dimension `{0}`")]
    UnknownLabelDimension(String),
}

/// Errors raised by a [`ReportPlan`](crate::ReportPlan) before any chart is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The plan's grammar is invalid.
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    /// A chart request references a dimension the grammar does not declare.
    #[error("Chart `{chart}` references unknown dimension `{dimension}`")]
    UnknownDimension {
        /// Title template of the chart request.
        chart: String,
        /// The unknown dimension name.
        dimension: String,
    },
}

/// Fatal errors raised while loading a benchmark report document.
#[cfg(feature = "json")]
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document is not valid JSON, or lacks the `benchmarks` array.
    #[error("Invalid benchmark report: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}

/// Non-fatal conditions observed while building a report.
///
/// Diagnostics are returned alongside results so callers and tests can
/// inspect them; none of them aborts a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A raw code had no entry in the label table and was kept as-is.
    UntranslatedDimension {
        /// Dimension whose code was not translated.
        dimension: String,
        /// The raw (possibly compound) code.
        raw: String,
    },
    /// The baseline method has no measurement for a category, so no speedup
    /// could be computed there.
    MissingBaseline {
        /// Title of the affected chart.
        chart: String,
        /// The skipped category.
        category: Label,
        /// The baseline method that was looked up.
        baseline: Label,
    },
    /// A chart or category had no data points and was omitted.
    EmptySeries {
        /// Title of the affected chart.
        chart: String,
        /// The empty category, when the chart is split by category.
        category: Option<Label>,
    },
    /// A split chart has data for a category outside its fixed category list.
    UnplottedCategory {
        /// Title template of the affected chart request.
        chart: String,
        /// The category left out.
        category: Label,
    },
}

impl core::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UntranslatedDimension { dimension, raw } => {
                write!(f, "no display label for `{raw}` in dimension `{dimension}`")
            }
            Self::MissingBaseline {
                chart,
                category,
                baseline,
            } => write!(
                f,
                "baseline `{baseline}` missing for category `{category}` in chart `{chart}`"
            ),
            Self::EmptySeries {
                chart,
                category: Some(category),
            } => write!(f, "no data for `{category}` in chart `{chart}`"),
            Self::EmptySeries {
                chart,
                category: None,
            } => write!(f, "no data for chart `{chart}`"),
            Self::UnplottedCategory { chart, category } => {
                write!(f, "category `{category}` is not plotted in chart `{chart}`")
            }
        }
    }
}
