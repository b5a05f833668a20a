//! Cursor-scoped context: current scene, who has spoken, which act.
//!
//! Cursors are character offsets (not byte offsets) and are clamped to the
//! document. Every query works on whole lines, so the line the cursor sits on
//! counts as reached.

use std::fmt;

use slugline_core::vocab::{clean_character_name, is_tag_line};
use slugline_core::{ElementType, FountainElement};

use crate::parse;

/// Minimum length, in characters, of an action line kept as a story beat.
const MIN_BEAT_LEN: usize = 10;

/// Three-act position estimated from scene order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Act {
    #[default]
    One,
    Two,
    Three,
}

impl Act {
    /// Map a position in `[0, 1)` through the scene list onto an act.
    pub fn from_ratio(ratio: f64) -> Act {
        if ratio < 0.33 {
            Act::One
        } else if ratio < 0.67 {
            Act::Two
        } else {
            Act::Three
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Act::One => 1,
            Act::Two => 2,
            Act::Three => 3,
        }
    }
}

impl fmt::Display for Act {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Act {}", self.number())
    }
}

/// What has happened in the current scene up to the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneContext {
    /// Trimmed heading of the current scene, if the cursor is inside one.
    pub heading: Option<String>,
    /// 1-based line of that heading.
    pub line_number: Option<usize>,
    /// Speakers so far, cleaned, in order of first appearance.
    pub characters: Vec<String>,
    /// Substantial action lines so far.
    pub beats: Vec<String>,
}

/// Scene context plus act estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PromptContext {
    pub scene: SceneContext,
    pub act: Act,
}

/// 1-based line the cursor sits on.
fn cursor_line(document: &str, cursor: usize) -> usize {
    let byte = document
        .char_indices()
        .nth(cursor)
        .map_or(document.len(), |(index, _)| index);
    document[..byte].matches('\n').count() + 1
}

/// Elements on or before the cursor's line.
fn reached(elements: &[FountainElement], cursor_line: usize) -> &[FountainElement] {
    &elements[..cursor_line.min(elements.len())]
}

fn last_heading(elements: &[FountainElement]) -> Option<usize> {
    elements
        .iter()
        .rposition(|e| e.kind == ElementType::SceneHeading)
}

/// The nearest scene heading at or before the cursor.
pub fn current_scene_heading(document: &str, cursor: usize) -> Option<String> {
    let elements = parse(document);
    let reached = reached(&elements, cursor_line(document, cursor));
    last_heading(reached).map(|index| reached[index].text.trim().to_string())
}

/// Heading, speakers and story beats of the scene the cursor is in.
///
/// Before the first heading the whole document up to the cursor counts as
/// the scene.
pub fn scene_context(document: &str, cursor: usize) -> SceneContext {
    let elements = parse(document);
    scene_context_of(reached(&elements, cursor_line(document, cursor)))
}

fn scene_context_of(reached: &[FountainElement]) -> SceneContext {
    let start = last_heading(reached);
    let mut context = SceneContext {
        heading: start.map(|index| reached[index].text.trim().to_string()),
        line_number: start.map(|index| reached[index].line_number),
        ..Default::default()
    };

    for element in &reached[start.unwrap_or(0)..] {
        let text = element.text.trim();
        match element.kind {
            ElementType::Character => {
                let name = clean_character_name(text);
                if !name.is_empty() && !context.characters.contains(&name) {
                    context.characters.push(name);
                }
            }
            ElementType::Action if text.chars().count() > MIN_BEAT_LEN && !is_tag_line(text) => {
                context.beats.push(text.to_string());
            }
            _ => {}
        }
    }

    context
}

/// Estimate the act from the current heading's position among all headings.
///
/// The ratio is the zero-based ordinal of the current heading over the total
/// number of headings, so of four scenes the first two fall in act one and
/// the last in act three. With three or fewer headings the last scene is at
/// most 2/3 through, below the 0.67 cut, so act three is never reached.
pub fn estimate_act(document: &str, cursor: usize) -> Act {
    let elements = parse(document);
    act_of(&elements, cursor_line(document, cursor))
}

fn act_of(elements: &[FountainElement], cursor_line: usize) -> Act {
    let is_heading = |e: &&FountainElement| e.kind == ElementType::SceneHeading;
    let total = elements.iter().filter(is_heading).count();
    let before = reached(elements, cursor_line)
        .iter()
        .filter(is_heading)
        .count()
        .min(total);

    if before == 0 {
        return Act::One;
    }
    Act::from_ratio((before - 1) as f64 / total as f64)
}

/// Scene context and act estimate in one parse.
pub fn prompt_context(document: &str, cursor: usize) -> PromptContext {
    let elements = parse(document);
    let line = cursor_line(document, cursor);
    let context = PromptContext {
        scene: scene_context_of(reached(&elements, line)),
        act: act_of(&elements, line),
    };
    tracing::debug!(
        cursor,
        line,
        act = context.act.number(),
        characters = context.scene.characters.len(),
        "built prompt context"
    );
    context
}
