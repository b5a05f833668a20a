//! Fountain screenplay reader for slugline.
//!
//! Turns raw Fountain text into one [`FountainElement`] per physical line and
//! answers cursor-scoped questions about it (which scene the cursor is in,
//! who has spoken so far, roughly which act this is).
//!
//! # Fountain Elements
//!
//! - Scene headings (INT./EXT.)
//! - Action
//! - Character, dialogue and parentheticals
//! - Transitions and centered text
//! - Sections, synopses, notes, lyrics and page breaks
//! - Title page metadata

mod context;

pub use context::{
    Act, PromptContext, SceneContext, current_scene_heading, estimate_act, prompt_context,
    scene_context,
};

use slugline_core::vocab::is_title_page_key;
use slugline_core::{ElementType, FountainElement, Line, LineVisitor, TitlePageField, walk_lines};

/// Parse a document into one element per line.
///
/// Lines are split on `\n` only, so a trailing `\r` stays part of the line
/// text. Never fails; anything unrecognised is action.
pub fn parse(document: &str) -> Vec<FountainElement> {
    let elements = walk_lines(document, ElementCollector::default());
    tracing::debug!(lines = elements.len(), "parsed fountain document");
    elements
}

/// The `Key: value` fields of the title page, if the document opens with one.
pub fn title_page(document: &str) -> Vec<TitlePageField> {
    let mut fields: Vec<TitlePageField> = Vec::new();

    for line in document.split('\n') {
        if line.trim().is_empty() {
            break;
        }
        if let Some((key, value)) = title_key_line(line) {
            fields.push(TitlePageField {
                key: key.to_string(),
                value: value.to_string(),
            });
        } else if is_continuation(line)
            && let Some(field) = fields.last_mut()
        {
            if !field.value.is_empty() {
                field.value.push('\n');
            }
            field.value.push_str(line.trim());
        } else {
            break;
        }
    }

    fields
}

fn title_key_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    is_title_page_key(key).then(|| (key.trim(), value.trim()))
}

fn is_continuation(line: &str) -> bool {
    line.starts_with("   ") || line.starts_with('\t')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum TitlePageState {
    #[default]
    Pending,
    Open,
    Closed,
}

/// Collects classified lines, retyping a leading title page.
#[derive(Debug, Default)]
struct ElementCollector {
    elements: Vec<FountainElement>,
    title_page: TitlePageState,
}

impl ElementCollector {
    fn title_page_kind(&mut self, line: &Line<'_>) -> Option<ElementType> {
        match self.title_page {
            TitlePageState::Pending => {
                if title_key_line(line.text).is_some() {
                    self.title_page = TitlePageState::Open;
                    Some(ElementType::TitlePage)
                } else {
                    self.title_page = TitlePageState::Closed;
                    None
                }
            }
            TitlePageState::Open => {
                if !line.is_blank()
                    && (title_key_line(line.text).is_some() || is_continuation(line.text))
                {
                    Some(ElementType::TitlePage)
                } else {
                    self.title_page = TitlePageState::Closed;
                    None
                }
            }
            TitlePageState::Closed => None,
        }
    }
}

impl LineVisitor for ElementCollector {
    type Output = Vec<FountainElement>;

    fn visit(&mut self, line: &Line<'_>) {
        let kind = self.title_page_kind(line).unwrap_or(line.kind);
        self.elements
            .push(FountainElement::new(kind, line.text, line.number));
    }

    fn finish(self, _line_count: usize) -> Self::Output {
        self.elements
    }
}
