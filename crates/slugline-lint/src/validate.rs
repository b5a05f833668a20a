//! Format validation.
//!
//! Each line gets at most one content issue (the first rule that matches) and
//! is then checked for spacing on its own.

use std::sync::LazyLock;

use regex::Regex;
use slugline_core::vocab::{
    ATTRIBUTION_VERBS, PRONOUNS, PROSE_LABELS, SCENE_HEADING_PREFIX, SCENE_HEADING_STRICT,
    TITLE_CASE_NAME, append_time_of_day, clean_character_name, is_all_caps, is_excluded_cue,
    is_location_noun, is_title_page_key, word_count,
};
use slugline_core::{
    ElementType, Fix, FormatIssue, IssueKind, Line, LineVisitor, Severity, ValidateOptions,
    ValidationResult, classify, walk_lines,
};
use tracing::instrument;

/// Longest name accepted in `NAME: line` and `Name - line` shorthand.
const MAX_SHORTHAND_WORDS: usize = 3;

/// Longest standalone line considered a location.
const MAX_LOCATION_WORDS: usize = 5;

/// `john: hi there`
static COLON_SHORTHAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\p{L}[\p{L}'’.\-]*(?:[ \t]+\p{L}[\p{L}'’.\-]*)*)[ \t]*:\s+(\S.*)$")
        .expect("valid colon shorthand pattern")
});

/// `John - hi there`
static DASH_SHORTHAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\p{Lu}[\p{L}'’]*(?:[ \t]+\p{Lu}[\p{L}'’]*)*)[ \t]+[-–—]+[ \t]+(\S.*)$")
        .expect("valid dash shorthand pattern")
});

/// Capitalised words with no trailing punctuation: `Joe's Diner`.
static PLACE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{Lu}[\p{L}\d'’\-]*(?:[ \t]+\p{Lu}[\p{L}\d'’\-]*)*$")
        .expect("valid place pattern")
});

const QUOTE: &str = r#"["“”]"#;
const SPEAKER: &str = r"\p{Lu}[\p{L}'’\-]*(?:[ \t]+\p{Lu}[\p{L}'’\-]*)?";

/// `"Run!" said John.`
static QUOTE_VERB_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{QUOTE}(.+?){QUOTE}\s*,?\s*(?:{ATTRIBUTION_VERBS})\s+({SPEAKER})\s*\.?$"
    ))
    .expect("valid attribution pattern")
});

/// `"Run," John said.`
static QUOTE_NAME_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{QUOTE}(.+?){QUOTE}\s*,?\s*({SPEAKER})\s+(?:{ATTRIBUTION_VERBS})\s*\.?$"
    ))
    .expect("valid attribution pattern")
});

/// `John said, "Run."`
static NAME_VERB_QUOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^({SPEAKER})\s+(?:{ATTRIBUTION_VERBS})\s*[,:]?\s*{QUOTE}(.+?){QUOTE}$"
    ))
    .expect("valid attribution pattern")
});

/// Validate a document.
pub fn validate(document: &str) -> ValidationResult {
    validate_with_options(document, &ValidateOptions::default())
}

/// Validate a document with options.
#[instrument(skip_all, fields(bytes = document.len()))]
pub fn validate_with_options(document: &str, options: &ValidateOptions) -> ValidationResult {
    let issues = walk_lines(document, Validator::new(options));
    let result = ValidationResult::from_issues(issues);
    tracing::debug!(
        issues = result.issues.len(),
        fixable = result.has_auto_fixable_issues,
        "validated document"
    );
    result
}

/// A heading uppercased with a time of day appended when it has none.
pub(crate) fn normalize_heading(heading: &str, time_of_day: &str) -> String {
    let upper = heading.trim().to_uppercase();
    if SCENE_HEADING_STRICT.is_match(&upper) {
        upper
    } else {
        append_time_of_day(&upper, time_of_day)
    }
}

/// A line split into cue and dialogue. A cue only reads as one after a
/// break, so a blank line leads the fix when the line above has text.
fn split_fix(line: &Line<'_>, name: &str, dialogue: &str) -> Fix {
    let fix = Fix::cue_and_dialogue(name, dialogue);
    if line.follows_break() {
        return fix;
    }
    let mut lines = vec![String::new()];
    lines.extend(fix.lines().into_iter().map(str::to_string));
    Fix::MultiLine(lines)
}

/// Rejects pronouns, speech verbs and boilerplate posing as names.
fn is_speaker_name(name: &str) -> bool {
    let upper = name.to_uppercase();
    let is_verb = |word: &str| {
        ATTRIBUTION_VERBS
            .split('|')
            .any(|verb| verb.eq_ignore_ascii_case(word))
    };
    !is_excluded_cue(&upper)
        && upper
            .split_whitespace()
            .all(|word| !PRONOUNS.contains(&word) && !is_verb(word))
}

struct Validator<'o> {
    options: &'o ValidateOptions,
    issues: Vec<FormatIssue>,
}

impl<'o> Validator<'o> {
    fn new(options: &'o ValidateOptions) -> Self {
        Self {
            options,
            issues: Vec::new(),
        }
    }

    fn content_issue(&self, line: &Line<'_>) -> Option<FormatIssue> {
        match line.kind {
            ElementType::Action => self
                .colon_shorthand(line)
                .or_else(|| self.dash_shorthand(line))
                .or_else(|| self.mixed_case_cue(line))
                .or_else(|| self.bare_location(line))
                .or_else(|| self.prose_dialogue(line)),
            ElementType::SceneHeading => self
                .lowercase_prefix(line)
                .or_else(|| self.missing_time(line)),
            ElementType::Character if !line.precedes_text() => self.bare_location(line),
            _ => None,
        }
    }

    fn issue(
        &self,
        line: &Line<'_>,
        severity: Severity,
        kind: IssueKind,
        description: &str,
    ) -> FormatIssue {
        FormatIssue::new(line.number, severity, kind, description, line.text)
    }

    fn colon_shorthand(&self, line: &Line<'_>) -> Option<FormatIssue> {
        let caps = COLON_SHORTHAND.captures(line.trimmed())?;
        let name = &caps[1];
        let upper = name.to_uppercase();
        if is_title_page_key(name)
            || PROSE_LABELS.contains(&upper.as_str())
            || word_count(name) > MAX_SHORTHAND_WORDS
            || !is_speaker_name(name)
        {
            return None;
        }
        Some(
            self.issue(
                line,
                Severity::Warning,
                IssueKind::Character,
                "dialogue written as NAME: line; put the name on its own line as a character cue",
            )
            .with_fix(split_fix(line, name, &caps[2])),
        )
    }

    fn dash_shorthand(&self, line: &Line<'_>) -> Option<FormatIssue> {
        let caps = DASH_SHORTHAND.captures(line.trimmed())?;
        let name = &caps[1];
        if word_count(name) > MAX_SHORTHAND_WORDS
            || PROSE_LABELS.contains(&name.to_uppercase().as_str())
            || !is_speaker_name(name)
        {
            return None;
        }
        Some(
            self.issue(
                line,
                Severity::Warning,
                IssueKind::Character,
                "dialogue written as Name - line; put the name on its own line as a character cue",
            )
            .with_fix(split_fix(line, name, &caps[2])),
        )
    }

    fn mixed_case_cue(&self, line: &Line<'_>) -> Option<FormatIssue> {
        let text = line.trimmed();
        if !line.follows_break()
            || !line.precedes_text()
            || !TITLE_CASE_NAME.is_match(text)
            || is_all_caps(text)
        {
            return None;
        }
        let name = clean_character_name(text);
        if word_count(&name) > MAX_SHORTHAND_WORDS + 1 || !is_speaker_name(&name) {
            return None;
        }
        Some(
            self.issue(
                line,
                Severity::Warning,
                IssueKind::Character,
                "character cue should be uppercase",
            )
            .with_fix(Fix::SingleLine(text.to_uppercase())),
        )
    }

    fn bare_location(&self, line: &Line<'_>) -> Option<FormatIssue> {
        let text = line.trimmed();
        if !line.follows_break()
            || line.precedes_text()
            || word_count(text) > MAX_LOCATION_WORDS
            || !PLACE_PHRASE.is_match(text)
        {
            return None;
        }
        let upper = text.to_uppercase();
        let last = upper.split_whitespace().next_back()?;
        if !is_location_noun(last) {
            return None;
        }
        Some(
            self.issue(
                line,
                Severity::Info,
                IssueKind::SceneHeading,
                "line looks like a location; write it as a scene heading",
            )
            .with_fix(Fix::SingleLine(format!(
                "INT. {upper} - {}",
                self.options.default_time_of_day
            ))),
        )
    }

    fn prose_dialogue(&self, line: &Line<'_>) -> Option<FormatIssue> {
        let text = line.trimmed();
        let (name, dialogue) = if let Some(caps) = QUOTE_VERB_NAME.captures(text) {
            (caps.get(2)?.as_str(), caps.get(1)?.as_str())
        } else if let Some(caps) = QUOTE_NAME_VERB.captures(text) {
            (caps.get(2)?.as_str(), caps.get(1)?.as_str())
        } else if let Some(caps) = NAME_VERB_QUOTE.captures(text) {
            (caps.get(1)?.as_str(), caps.get(2)?.as_str())
        } else {
            return None;
        };
        if !is_speaker_name(name) {
            return None;
        }
        Some(
            self.issue(
                line,
                Severity::Warning,
                IssueKind::Dialogue,
                "prose-style dialogue; use a character cue followed by the line",
            )
            .with_fix(split_fix(line, name, dialogue.trim_end_matches(','))),
        )
    }

    fn lowercase_prefix(&self, line: &Line<'_>) -> Option<FormatIssue> {
        let text = line.trimmed();
        let caps = SCENE_HEADING_PREFIX.captures(text)?;
        if !caps[1].chars().any(char::is_lowercase) {
            return None;
        }
        Some(
            self.issue(
                line,
                Severity::Warning,
                IssueKind::SceneHeading,
                "scene heading prefix should be uppercase",
            )
            .with_fix(Fix::SingleLine(normalize_heading(
                text,
                &self.options.default_time_of_day,
            ))),
        )
    }

    fn missing_time(&self, line: &Line<'_>) -> Option<FormatIssue> {
        let text = line.trimmed();
        if SCENE_HEADING_STRICT.is_match(text) {
            return None;
        }
        Some(
            self.issue(
                line,
                Severity::Info,
                IssueKind::SceneHeading,
                "scene heading is missing a time of day",
            )
            .with_fix(Fix::SingleLine(append_time_of_day(
                text,
                &self.options.default_time_of_day,
            ))),
        )
    }

    fn spacing_issue(&self, line: &Line<'_>) -> Option<FormatIssue> {
        match line.kind {
            ElementType::Character
                if line
                    .previous
                    .is_some_and(|p| !matches!(p, ElementType::Empty | ElementType::SceneHeading)) =>
            {
                Some(self.issue(
                    line,
                    Severity::Info,
                    IssueKind::Spacing,
                    "character cue should be preceded by a blank line",
                ))
            }
            ElementType::SceneHeading
                if line.next_text.is_some_and(|next| {
                    !next.trim().is_empty()
                        && classify(next, Some(ElementType::SceneHeading))
                            != ElementType::SceneHeading
                }) =>
            {
                Some(self.issue(
                    line,
                    Severity::Info,
                    IssueKind::Spacing,
                    "scene heading should be followed by a blank line",
                ))
            }
            _ => None,
        }
    }
}

impl LineVisitor for Validator<'_> {
    type Output = Vec<FormatIssue>;

    fn visit(&mut self, line: &Line<'_>) {
        if let Some(issue) = self.content_issue(line) {
            tracing::trace!(line = line.number, kind = %issue.kind, "format issue");
            self.issues.push(issue);
        }
        if self.options.check_spacing
            && let Some(issue) = self.spacing_issue(line)
        {
            self.issues.push(issue);
        }
    }

    fn finish(self, _line_count: usize) -> Self::Output {
        self.issues
    }
}
