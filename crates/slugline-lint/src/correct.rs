//! Auto-correction passes.
//!
//! A [`Pipeline`] runs [`Pass`]es over the lines of a document in order and
//! records every change. [`correct`] applies suggested fixes and then fixes
//! spacing; [`quick_correct`] is a cheap heading cleanup for use while typing.

use std::sync::LazyLock;

use regex::Regex;
use slugline_core::vocab::{DEFAULT_TIME_OF_DAY, PREFIX_PATTERN};
use slugline_core::{
    AppliedFix, Classifier, CorrectionResult, ElementType, Fix, FormatIssue, Pass, classify,
    split_lines,
};
use tracing::instrument;

/// Leading space, prefix, rest of heading, trailing space.
static QUICK_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^(\s*)({PREFIX_PATTERN})([.\s].*?)(\s*)$"))
        .expect("valid quick heading pattern")
});

/// A sequence of passes run over one document.
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Append a pass.
    pub fn then<P: Pass + 'static>(mut self, pass: P) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Run every pass over `document`.
    pub fn run(&self, document: &str) -> CorrectionResult {
        let lines: Vec<String> = split_lines(document)
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut applied = Vec::new();
        let lines = self.apply(lines, &mut applied);

        CorrectionResult {
            corrected_content: lines.join("\n"),
            change_count: applied.len(),
            applied_fixes: applied,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for Pipeline {
    fn name(&self) -> &str {
        "pipeline"
    }

    fn apply(&self, mut lines: Vec<String>, applied: &mut Vec<AppliedFix>) -> Vec<String> {
        for pass in &self.passes {
            let before = applied.len();
            lines = pass.apply(lines, applied);
            tracing::debug!(
                pass = pass.name(),
                changes = applied.len() - before,
                "ran correction pass"
            );
        }
        lines
    }
}

/// Keep a line's `\r` ending on its replacement lines.
fn carry_line_ending(original: &str, replacement: &str) -> String {
    if original.ends_with('\r') && !replacement.ends_with('\r') {
        format!("{replacement}\r")
    } else {
        replacement.to_string()
    }
}

/// Apply the suggested fixes of a set of issues, from the last line to the
/// first, so splicing one fix never shifts the lines of another.
///
/// Only the first fixable issue on a line is applied. A fix whose line is out
/// of range, or no longer reads as `original_text`, is skipped.
pub struct ApplySuggestedFixes {
    issues: Vec<FormatIssue>,
}

impl ApplySuggestedFixes {
    pub fn new(issues: &[FormatIssue]) -> Self {
        let mut issues: Vec<FormatIssue> = issues
            .iter()
            .filter(|issue| issue.is_fixable())
            .cloned()
            .collect();
        issues.sort_by(|a, b| b.line_number.cmp(&a.line_number));
        issues.dedup_by_key(|issue| issue.line_number);
        Self { issues }
    }
}

impl Pass for ApplySuggestedFixes {
    fn name(&self) -> &str {
        "apply-suggested-fixes"
    }

    fn apply(&self, mut lines: Vec<String>, applied: &mut Vec<AppliedFix>) -> Vec<String> {
        for issue in &self.issues {
            let Some(fix) = issue.suggested_fix.as_ref() else {
                continue;
            };
            let index = issue.line_number.wrapping_sub(1);
            let Some(current) = lines.get(index) else {
                tracing::trace!(line = issue.line_number, "fix skipped: line out of range");
                continue;
            };
            if current.trim() != issue.original_text.trim() {
                tracing::trace!(line = issue.line_number, "fix skipped: line has changed");
                continue;
            }

            let original = current.clone();
            let replacement: Vec<String> = fix
                .lines()
                .into_iter()
                .map(|line| carry_line_ending(&original, line))
                .collect();
            lines.splice(index..=index, replacement);

            tracing::trace!(line = issue.line_number, fix = %fix, "applied fix");
            applied.push(AppliedFix {
                line_number: issue.line_number,
                description: issue.description.clone(),
                original_text: original,
                replacement: fix.clone(),
            });
        }
        lines
    }
}

/// Insert the blank lines Fountain needs around headings and cues.
///
/// Lines are reclassified as the pass goes, so a line that becomes a cue once
/// a blank line is inserted before it is handled too.
pub struct SpacingPass;

impl SpacingPass {
    fn blank_like(line: &str) -> String {
        carry_line_ending(line, "")
    }

    fn record(applied: &mut Vec<AppliedFix>, line_number: usize, line: &str, blank_after: bool) {
        let (description, replacement) = if blank_after {
            ("inserted blank line after scene heading", vec![line.to_string(), String::new()])
        } else {
            ("inserted blank line before character cue", vec![String::new(), line.to_string()])
        };
        applied.push(AppliedFix {
            line_number,
            description: description.to_string(),
            original_text: line.to_string(),
            replacement: Fix::MultiLine(replacement),
        });
    }
}

impl Pass for SpacingPass {
    fn name(&self) -> &str {
        "spacing"
    }

    fn apply(&self, lines: Vec<String>, applied: &mut Vec<AppliedFix>) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(lines.len());
        let mut classifier = Classifier::new();

        for (index, line) in lines.iter().enumerate() {
            let previous = classifier.previous();
            if classify(line, previous) == ElementType::Character
                && previous
                    .is_some_and(|p| !matches!(p, ElementType::Empty | ElementType::SceneHeading))
            {
                out.push(Self::blank_like(line));
                classifier.push("");
                Self::record(applied, out.len(), line, false);
            }

            let kind = classifier.push(line);
            out.push(line.clone());

            if kind == ElementType::SceneHeading
                && let Some(next) = lines.get(index + 1)
                && !next.trim().is_empty()
                && classify(next, Some(ElementType::SceneHeading)) != ElementType::SceneHeading
            {
                out.push(Self::blank_like(line));
                classifier.push("");
                Self::record(applied, out.len(), line, true);
            }
        }

        out
    }
}

/// Uppercase heading prefixes and give every heading without a dash a time
/// of day. Regex substitution only; no classification.
pub struct QuickCorrect {
    time_of_day: String,
}

impl QuickCorrect {
    pub fn new() -> Self {
        Self::with_time_of_day(DEFAULT_TIME_OF_DAY)
    }

    pub fn with_time_of_day(time_of_day: impl Into<String>) -> Self {
        Self {
            time_of_day: time_of_day.into(),
        }
    }

    fn fix_line(&self, line: &str) -> Option<String> {
        let caps = QUICK_HEADING.captures(line)?;
        let (lead, prefix, rest, trail) = (&caps[1], &caps[2], &caps[3], &caps[4]);

        let mut fixed = format!("{lead}{}{rest}", prefix.to_uppercase());
        if !rest.contains(['-', '–', '—']) {
            fixed.push_str(" - ");
            fixed.push_str(&self.time_of_day);
        }
        fixed.push_str(trail);

        (fixed != line).then_some(fixed)
    }
}

impl Default for QuickCorrect {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for QuickCorrect {
    fn name(&self) -> &str {
        "quick-correct"
    }

    fn apply(&self, lines: Vec<String>, applied: &mut Vec<AppliedFix>) -> Vec<String> {
        lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| match self.fix_line(&line) {
                Some(fixed) => {
                    applied.push(AppliedFix {
                        line_number: index + 1,
                        description: "normalized scene heading".to_string(),
                        original_text: line,
                        replacement: Fix::SingleLine(fixed.clone()),
                    });
                    fixed
                }
                None => line,
            })
            .collect()
    }
}

/// Apply the suggested fixes of `issues` to `document`, then fix spacing.
#[instrument(skip_all, fields(issues = issues.len()))]
pub fn correct(document: &str, issues: &[FormatIssue]) -> CorrectionResult {
    let result = Pipeline::new()
        .then(ApplySuggestedFixes::new(issues))
        .then(SpacingPass)
        .run(document);
    tracing::debug!(changes = result.change_count, "corrected document");
    result
}

/// Uppercase scene heading prefixes and append ` - DAY` to headings with no
/// dash.
pub fn quick_correct(document: &str) -> CorrectionResult {
    Pipeline::new().then(QuickCorrect::new()).run(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate;
    use slugline_core::{IssueKind, Severity};

    #[test]
    fn test_correct_office_example() {
        let doc = "int. office\n\njohn: hi there";
        let result = correct(doc, &validate(doc).issues);

        assert_eq!(result.corrected_content, "INT. OFFICE - DAY\n\nJOHN\nhi there");
        assert_eq!(result.change_count, 2);
        // Fixes are applied from the last line up.
        assert_eq!(result.applied_fixes[0].line_number, 3);
        assert_eq!(result.applied_fixes[1].line_number, 1);

        let again = validate(&result.corrected_content);
        assert!(again.issues_of(IssueKind::Character).next().is_none());
        assert!(again.issues_of(IssueKind::SceneHeading).next().is_none());
    }

    #[test]
    fn test_correct_shorthand_after_action() {
        let doc = "INT. X - DAY\n\nShe walks in.\njohn: hi there";
        let result = correct(doc, &validate(doc).issues);
        assert_eq!(
            result.corrected_content,
            "INT. X - DAY\n\nShe walks in.\n\nJOHN\nhi there"
        );

        let mut classifier = Classifier::new();
        let kinds: Vec<ElementType> = result
            .corrected_content
            .split('\n')
            .map(|line| classifier.push(line))
            .collect();
        assert_eq!(kinds[4..], [ElementType::Character, ElementType::Dialogue]);
        assert!(correct(&result.corrected_content, &[]).is_unchanged());
    }

    #[test]
    fn test_correct_skips_stale_fixes() {
        let issue = FormatIssue::new(1, Severity::Warning, IssueKind::Character, "x", "john: hi")
            .with_fix(Fix::cue_and_dialogue("john", "hi"));
        let result = correct("mary: hello", &[issue]);
        assert_eq!(result.corrected_content, "mary: hello");
        assert!(result.is_unchanged());
    }

    #[test]
    fn test_correct_skips_out_of_range_fixes() {
        let issue = FormatIssue::new(9, Severity::Info, IssueKind::General, "x", "")
            .with_fix(Fix::SingleLine("y".to_string()));
        let zero = FormatIssue::new(0, Severity::Info, IssueKind::General, "x", "")
            .with_fix(Fix::SingleLine("y".to_string()));
        let result = correct("Just prose.", &[issue, zero]);
        assert_eq!(result.corrected_content, "Just prose.");
    }

    #[test]
    fn test_first_fix_per_line_wins() {
        let first = FormatIssue::new(1, Severity::Info, IssueKind::General, "a", "prose")
            .with_fix(Fix::SingleLine("first".to_string()));
        let second = FormatIssue::new(1, Severity::Info, IssueKind::General, "b", "prose")
            .with_fix(Fix::SingleLine("second".to_string()));
        let result = correct("prose", &[first, second]);
        assert_eq!(result.corrected_content, "first");
        assert_eq!(result.change_count, 1);
    }

    #[test]
    fn test_spacing_pass() {
        let doc = "INT. KITCHEN - DAY\nJOHN\nHi.\nMARY\nHey.";
        let result = correct(doc, &[]);
        assert_eq!(
            result.corrected_content,
            "INT. KITCHEN - DAY\n\nJOHN\nHi.\n\nMARY\nHey."
        );
        assert_eq!(result.change_count, 2);
        assert_eq!(result.applied_fixes[0].line_number, 2);
        assert_eq!(result.applied_fixes[1].line_number, 5);

        let again = correct(&result.corrected_content, &[]);
        assert!(again.is_unchanged());
        assert!(
            validate(&result.corrected_content)
                .issues_of(IssueKind::Spacing)
                .next()
                .is_none()
        );
    }

    #[test]
    fn test_spacing_keeps_consecutive_headings() {
        let doc = "INT. HOUSE - DAY\nEXT. HOUSE - DAY\n\nAction.";
        assert!(correct(doc, &[]).is_unchanged());
    }

    #[test]
    fn test_crlf_is_preserved() {
        let doc = "int. office\r\n\r\njohn: hi there\r";
        let result = correct(doc, &validate(doc).issues);
        assert_eq!(
            result.corrected_content,
            "INT. OFFICE - DAY\r\n\r\nJOHN\r\nhi there\r"
        );
    }

    #[test]
    fn test_quick_correct() {
        let result = quick_correct("int. kitchen\n\nJohn walks in.\n\next. park - night  ");
        assert_eq!(
            result.corrected_content,
            "INT. kitchen - DAY\n\nJohn walks in.\n\nEXT. park - night  "
        );
        assert_eq!(result.change_count, 2);
        assert!(quick_correct(&result.corrected_content).is_unchanged());
    }

    #[test]
    fn test_quick_correct_leaves_prose_alone() {
        let doc = "Interior design is hard.\nExternal affairs.";
        assert!(quick_correct(doc).is_unchanged());
    }

    #[test]
    fn test_pipeline_custom_time_of_day() {
        let result = Pipeline::new()
            .then(QuickCorrect::with_time_of_day("NIGHT"))
            .run("EXT. ALLEY");
        assert_eq!(result.corrected_content, "EXT. ALLEY - NIGHT");
    }
}
