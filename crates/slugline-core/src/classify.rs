//! Line classification.

use crate::ElementType;
use crate::vocab::{
    CHARACTER_CUE, MAX_CUE_LEN, SCENE_HEADING_PREFIX, clean_character_name, is_all_caps,
    is_boilerplate, is_narrative_heading,
};

/// Classify one line given the type of the line before it.
///
/// `previous` is `None` at the start of a document, which is treated like a
/// blank line. The classifier never yields [`ElementType::TitlePage`]; title
/// pages are recognised by the parser.
pub fn classify(line: &str, previous: Option<ElementType>) -> ElementType {
    let trimmed = line.trim();
    let previous = previous.unwrap_or(ElementType::Empty);

    if trimmed.is_empty() {
        return ElementType::Empty;
    }
    if SCENE_HEADING_PREFIX.is_match(trimmed) {
        return ElementType::SceneHeading;
    }
    if trimmed.ends_with("TO:") && is_all_caps(trimmed) {
        return ElementType::Transition;
    }
    if is_wrapped(trimmed, ">", "<") {
        return ElementType::Centered;
    }
    if trimmed == "===" {
        return ElementType::PageBreak;
    }
    if is_section(trimmed) {
        return ElementType::Section;
    }
    if trimmed.starts_with("= ") {
        return ElementType::Synopsis;
    }
    if is_wrapped(trimmed, "[[", "]]") {
        return ElementType::Note;
    }
    if is_wrapped(trimmed, "~", "~") {
        return ElementType::Lyrics;
    }
    if is_wrapped(trimmed, "(", ")") {
        return ElementType::Parenthetical;
    }
    if matches!(
        previous,
        ElementType::Empty | ElementType::Dialogue | ElementType::Parenthetical
    ) && trimmed.chars().count() < MAX_CUE_LEN
        && CHARACTER_CUE.is_match(trimmed)
    {
        let name = clean_character_name(trimmed);
        return if is_boilerplate(&name) {
            ElementType::Transition
        } else if is_narrative_heading(&name) {
            ElementType::Action
        } else {
            ElementType::Character
        };
    }
    if previous.is_dialogue_block() {
        return ElementType::Dialogue;
    }
    ElementType::Action
}

fn is_wrapped(text: &str, open: &str, close: &str) -> bool {
    text.len() >= open.len() + close.len() && text.starts_with(open) && text.ends_with(close)
}

fn is_section(text: &str) -> bool {
    let rest = text.trim_start_matches('#');
    rest.len() < text.len() && rest.starts_with(' ')
}

/// Threads the previous line's type through [`classify`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    previous: Option<ElementType>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type of the most recently classified line.
    pub fn previous(&self) -> Option<ElementType> {
        self.previous
    }

    /// Classify the next line of the document.
    pub fn push(&mut self, line: &str) -> ElementType {
        let kind = classify(line, self.previous);
        self.previous = Some(kind);
        kind
    }

    /// Start over as if at the beginning of a document.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}
