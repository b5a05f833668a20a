//! Format issues, suggested fixes and correction results.

use std::fmt;
use std::str::FromStr;

use crate::ParseKindError;

/// Severity of a format issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Severity {
    /// Cosmetic; the document still reads correctly.
    Info,
    /// Likely to be misread by Fountain tools.
    Warning,
    /// Structurally wrong.
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            _ => Err(ParseKindError::Severity(s.to_string())),
        }
    }
}

/// What part of the screenplay an issue concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IssueKind {
    Character,
    SceneHeading,
    Dialogue,
    Spacing,
    General,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Character => "character",
            IssueKind::SceneHeading => "scene_heading",
            IssueKind::Dialogue => "dialogue",
            IssueKind::Spacing => "spacing",
            IssueKind::General => "general",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "character" => Ok(IssueKind::Character),
            "scene_heading" => Ok(IssueKind::SceneHeading),
            "dialogue" => Ok(IssueKind::Dialogue),
            "spacing" => Ok(IssueKind::Spacing),
            "general" => Ok(IssueKind::General),
            _ => Err(ParseKindError::IssueKind(s.to_string())),
        }
    }
}

/// A literal replacement for one source line.
///
/// Serializes as a plain string for a single line and as an array of strings
/// when one line expands into several.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Fix {
    SingleLine(String),
    MultiLine(Vec<String>),
}

impl Fix {
    /// Build a fix from newline-joined text.
    pub fn from_text(text: &str) -> Self {
        if text.contains('\n') {
            Fix::MultiLine(text.split('\n').map(str::to_string).collect())
        } else {
            Fix::SingleLine(text.to_string())
        }
    }

    /// Split a line into a character cue and the dialogue that follows it.
    pub fn cue_and_dialogue(name: &str, dialogue: &str) -> Self {
        Fix::MultiLine(vec![name.to_uppercase(), dialogue.trim().to_string()])
    }

    /// The replacement lines.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Fix::SingleLine(line) => vec![line.as_str()],
            Fix::MultiLine(lines) => lines.iter().map(String::as_str).collect(),
        }
    }

    /// The replacement as newline-joined text.
    pub fn to_text(&self) -> String {
        self.lines().join("\n")
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// A format problem found on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatIssue {
    /// 1-based line number.
    pub line_number: usize,
    pub severity: Severity,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: IssueKind,
    pub description: String,
    /// The offending line as it appeared in the document.
    pub original_text: String,
    pub suggested_fix: Option<Fix>,
}

impl FormatIssue {
    /// Create an issue with no suggested fix.
    pub fn new(
        line_number: usize,
        severity: Severity,
        kind: IssueKind,
        description: impl Into<String>,
        original_text: impl Into<String>,
    ) -> Self {
        Self {
            line_number,
            severity,
            kind,
            description: description.into(),
            original_text: original_text.into(),
            suggested_fix: None,
        }
    }

    /// Attach a suggested fix.
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.suggested_fix = Some(fix);
        self
    }

    pub fn is_fixable(&self) -> bool {
        self.suggested_fix.is_some()
    }
}

/// Outcome of validating a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<FormatIssue>,
    pub has_auto_fixable_issues: bool,
}

impl ValidationResult {
    pub fn from_issues(issues: Vec<FormatIssue>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            has_auto_fixable_issues: issues.iter().any(FormatIssue::is_fixable),
            issues,
        }
    }

    /// Issues of one kind, in line order.
    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &FormatIssue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }

    /// The most severe issue level present.
    pub fn max_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|issue| issue.severity).max()
    }
}

/// A change the corrector made.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedFix {
    /// 1-based line number the change was made at, in the document as it was
    /// when the change was applied.
    pub line_number: usize,
    pub description: String,
    pub original_text: String,
    pub replacement: Fix,
}

/// Outcome of correcting a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorrectionResult {
    pub corrected_content: String,
    pub applied_fixes: Vec<AppliedFix>,
    pub change_count: usize,
}

impl CorrectionResult {
    pub fn is_unchanged(&self) -> bool {
        self.change_count == 0
    }
}
