//! Element types - the role a single physical line plays in a screenplay.

use std::fmt;
use std::str::FromStr;

use crate::ParseKindError;

/// The structural role of one line.
///
/// Exactly one type is assigned per physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ElementType {
    /// `INT. KITCHEN - DAY`
    SceneHeading,
    /// Narrative description; the fallback for anything unrecognised.
    Action,
    /// An uppercase speaker cue.
    Character,
    /// A line spoken by the preceding character.
    Dialogue,
    /// `(beat)` inside a dialogue block.
    Parenthetical,
    /// `CUT TO:` and screenplay boilerplate such as `THE END`.
    Transition,
    /// `> THE END <`
    Centered,
    /// `===`
    PageBreak,
    /// `# Act One`
    Section,
    /// `= The hero arrives.`
    Synopsis,
    /// `[[note]]`
    Note,
    /// `~sung line~`
    Lyrics,
    /// `Title: Something` key/value lines at the top of a document.
    TitlePage,
    /// Blank or whitespace-only.
    Empty,
}

impl ElementType {
    /// Every element type, in declaration order.
    pub const ALL: [ElementType; 14] = [
        ElementType::SceneHeading,
        ElementType::Action,
        ElementType::Character,
        ElementType::Dialogue,
        ElementType::Parenthetical,
        ElementType::Transition,
        ElementType::Centered,
        ElementType::PageBreak,
        ElementType::Section,
        ElementType::Synopsis,
        ElementType::Note,
        ElementType::Lyrics,
        ElementType::TitlePage,
        ElementType::Empty,
    ];

    /// The snake_case name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::SceneHeading => "scene_heading",
            ElementType::Action => "action",
            ElementType::Character => "character",
            ElementType::Dialogue => "dialogue",
            ElementType::Parenthetical => "parenthetical",
            ElementType::Transition => "transition",
            ElementType::Centered => "centered",
            ElementType::PageBreak => "page_break",
            ElementType::Section => "section",
            ElementType::Synopsis => "synopsis",
            ElementType::Note => "note",
            ElementType::Lyrics => "lyrics",
            ElementType::TitlePage => "title_page",
            ElementType::Empty => "empty",
        }
    }

    /// The type an editor should switch to when Enter is pressed on a line of
    /// this type.
    pub fn next_on_enter(self) -> ElementType {
        match self {
            ElementType::SceneHeading => ElementType::Action,
            ElementType::Character => ElementType::Dialogue,
            ElementType::Dialogue => ElementType::Action,
            ElementType::Parenthetical => ElementType::Dialogue,
            ElementType::Transition => ElementType::SceneHeading,
            _ => ElementType::Action,
        }
    }

    /// Character cues, dialogue and parentheticals.
    pub fn is_dialogue_block(self) -> bool {
        matches!(
            self,
            ElementType::Character | ElementType::Dialogue | ElementType::Parenthetical
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseKindError::ElementType(s.to_string()))
    }
}

/// One classified line of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FountainElement {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ElementType,
    /// Raw line content, untrimmed.
    pub text: String,
    /// 1-based line number.
    pub line_number: usize,
}

impl FountainElement {
    /// Create a new element.
    pub fn new(kind: ElementType, text: impl Into<String>, line_number: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line_number,
        }
    }
}

/// A `Key: value` entry from a title page.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TitlePageField {
    /// Key as written, e.g. `Draft date`.
    pub key: String,
    /// Value; continuation lines are joined with `\n`.
    pub value: String,
}
