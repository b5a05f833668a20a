//! Story entities extracted from a screenplay for import.

use std::fmt;
use std::str::FromStr;

use crate::ParseKindError;

/// Interior/exterior classification of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationType {
    #[cfg_attr(feature = "serde", serde(rename = "INT"))]
    Int,
    #[cfg_attr(feature = "serde", serde(rename = "EXT"))]
    Ext,
    #[cfg_attr(feature = "serde", serde(rename = "INT/EXT"))]
    IntExt,
}

impl LocationType {
    /// Classify a scene heading prefix such as `INT`, `EST` or `I./E`.
    ///
    /// Establishing shots count as exterior.
    pub fn from_prefix(prefix: &str) -> LocationType {
        match prefix.trim().trim_end_matches('.').to_uppercase().as_str() {
            "INT" => LocationType::Int,
            "EXT" | "EST" => LocationType::Ext,
            _ => LocationType::IntExt,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Int => "INT",
            LocationType::Ext => "EXT",
            LocationType::IntExt => "INT/EXT",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INT" => Ok(LocationType::Int),
            "EXT" => Ok(LocationType::Ext),
            "INT/EXT" | "I/E" => Ok(LocationType::IntExt),
            _ => Err(ParseKindError::LocationType(s.to_string())),
        }
    }
}

/// A distinct location named by one or more scene headings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Uppercase name with the time of day removed.
    pub name: String,
    pub location_type: LocationType,
}

/// A character under its canonical name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub name: String,
    /// Text gathered from `@NAME` description blocks.
    pub description: Option<String>,
}

impl Character {
    /// Create a character with no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A scene, bounded by its heading and the next heading or the end of the
/// document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scene {
    /// The heading line, trimmed.
    pub heading: String,
    pub location: String,
    pub location_type: LocationType,
    /// Canonical names in order of first appearance.
    pub characters: Vec<String>,
    /// 1-based line of the heading.
    pub start_line: usize,
    /// 1-based last line belonging to the scene.
    pub end_line: usize,
}

impl Scene {
    /// Open a scene at its heading line. The end line is provisional until the
    /// scene is closed.
    pub fn open(
        heading: impl Into<String>,
        location: impl Into<String>,
        location_type: LocationType,
        start_line: usize,
    ) -> Self {
        Self {
            heading: heading.into(),
            location: location.into(),
            location_type,
            characters: Vec::new(),
            start_line,
            end_line: start_line,
        }
    }

    /// Record a character appearance, ignoring repeats.
    pub fn add_character(&mut self, name: &str) {
        if !self.characters.iter().any(|c| c == name) {
            self.characters.push(name.to_string());
        }
    }

    /// Whether a 1-based line number falls inside this scene.
    pub fn contains_line(&self, line_number: usize) -> bool {
        (self.start_line..=self.end_line).contains(&line_number)
    }
}

/// What a questionable line appears to be declaring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QuestionableKind {
    Character,
    Location,
    SceneHeading,
}

/// A line that looks like an entity declaration but fails a strict format
/// rule. Surfaced for confirmation, never imported automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestionableItem {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: QuestionableKind,
    pub text: String,
    pub line_number: usize,
    pub reason: String,
    pub suggestion: Option<String>,
}

impl QuestionableItem {
    pub fn new(
        kind: QuestionableKind,
        text: impl Into<String>,
        line_number: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            line_number,
            reason: reason.into(),
            suggestion: None,
        }
    }

    /// Attach a suggested rewrite.
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Everything one extraction run found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoImportResult {
    /// Distinct locations in order of first appearance.
    pub locations: Vec<Location>,
    /// Canonical characters in order of first appearance.
    pub characters: Vec<Character>,
    pub scenes: Vec<Scene>,
    pub questionable_items: Vec<QuestionableItem>,
}

impl AutoImportResult {
    /// Look up a character by canonical name.
    pub fn character(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }

    /// The description recorded for a character, if any.
    pub fn character_description(&self, name: &str) -> Option<&str> {
        self.character(name)?.description.as_deref()
    }

    /// The type recorded for a location.
    pub fn location_type(&self, name: &str) -> Option<LocationType> {
        self.locations
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.location_type)
    }

    /// Canonical character names.
    pub fn character_names(&self) -> impl Iterator<Item = &str> {
        self.characters.iter().map(|c| c.name.as_str())
    }

    /// True when nothing importable or questionable was found.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
            && self.characters.is_empty()
            && self.scenes.is_empty()
            && self.questionable_items.is_empty()
    }
}
