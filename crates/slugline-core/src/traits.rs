//! Pass options, the correction `Pass` trait, and errors.

use crate::AppliedFix;
use crate::vocab::DEFAULT_TIME_OF_DAY;

/// Options for entity extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExtractOptions {
    /// Time of day suggested for headings that lack one.
    pub default_time_of_day: String,
    /// Shortest name that may be merged into a longer one.
    pub min_alias_len: usize,
    /// Longest accepted character cue, in words.
    pub max_character_words: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            default_time_of_day: DEFAULT_TIME_OF_DAY.to_string(),
            min_alias_len: 3,
            max_character_words: 4,
        }
    }
}

/// Options for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValidateOptions {
    /// Time of day suggested for headings that lack one.
    pub default_time_of_day: String,
    /// Report missing blank lines around cues and headings.
    pub check_spacing: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            default_time_of_day: DEFAULT_TIME_OF_DAY.to_string(),
            check_spacing: true,
        }
    }
}

/// Options for emitting Fountain text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EmitOptions {
    /// Drop trailing whitespace, including `\r`, from every line.
    pub strip_trailing_whitespace: bool,
    /// End the output with a newline.
    pub trailing_newline: bool,
}

/// Error parsing one of the closed vocabularies from its string name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseKindError {
    #[error("unknown element type: {0}")]
    ElementType(String),
    #[error("unknown severity: {0}")]
    Severity(String),
    #[error("unknown issue kind: {0}")]
    IssueKind(String),
    #[error("unknown location type: {0}")]
    LocationType(String),
}

/// A rewrite over the lines of a document.
///
/// Passes are total: a line a pass cannot handle is left as it is.
pub trait Pass: Send + Sync {
    /// Name of this pass.
    fn name(&self) -> &str;

    /// Rewrite the lines, recording every change in `applied`.
    fn apply(&self, lines: Vec<String>, applied: &mut Vec<AppliedFix>) -> Vec<String>;
}
