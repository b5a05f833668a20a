//! The extraction line scan.
//!
//! Names are collected exactly as cued; merging near-duplicates is left to
//! [`crate::dedup`].

use slugline_core::vocab::{
    SCENE_HEADING_STRICT, TITLE_CASE_NAME, append_time_of_day, clean_character_name, is_all_caps,
    is_excluded_cue, word_count,
};
use slugline_core::{
    ElementType, ExtractOptions, Line, LineVisitor, Location, LocationType, QuestionableItem,
    QuestionableKind, Scene,
};

/// Scan output before deduplication.
#[derive(Debug, Default)]
pub(crate) struct RawExtraction {
    pub locations: Vec<Location>,
    /// Names in order of first appearance.
    pub characters: Vec<String>,
    /// `(name, description)` in the order the blocks appeared.
    pub descriptions: Vec<(String, String)>,
    pub scenes: Vec<Scene>,
    pub questionable: Vec<QuestionableItem>,
}

/// An `@NAME` description block being gathered.
#[derive(Debug)]
struct Capture {
    name: String,
    parts: Vec<String>,
}

pub(crate) struct Scanner<'o> {
    options: &'o ExtractOptions,
    raw: RawExtraction,
    open: Option<Scene>,
    capture: Option<Capture>,
}

impl<'o> Scanner<'o> {
    pub fn new(options: &'o ExtractOptions) -> Self {
        Self {
            options,
            raw: RawExtraction::default(),
            open: None,
            capture: None,
        }
    }

    fn close_scene(&mut self, end_line: usize) {
        if let Some(mut scene) = self.open.take() {
            scene.end_line = end_line.max(scene.start_line);
            tracing::trace!(
                heading = %scene.heading,
                start = scene.start_line,
                end = scene.end_line,
                "closed scene"
            );
            self.raw.scenes.push(scene);
        }
    }

    fn end_capture(&mut self) {
        if let Some(capture) = self.capture.take()
            && !capture.parts.is_empty()
        {
            self.raw
                .descriptions
                .push((capture.name, capture.parts.join(" ")));
        }
    }

    fn add_character(&mut self, name: &str) {
        if !self.raw.characters.iter().any(|c| c == name) {
            self.raw.characters.push(name.to_string());
        }
        if let Some(scene) = self.open.as_mut() {
            scene.add_character(name);
        }
    }

    fn add_location(&mut self, name: &str, location_type: LocationType) {
        if !self.raw.locations.iter().any(|l| l.name == name) {
            self.raw.locations.push(Location {
                name: name.to_string(),
                location_type,
            });
        }
    }

    fn question(&mut self, item: QuestionableItem) {
        tracing::debug!(line = item.line_number, reason = %item.reason, "questionable line");
        self.raw.questionable.push(item);
    }

    fn scene_heading(&mut self, line: &Line<'_>) {
        let heading = line.trimmed();
        // Every heading ends the scene before it, accepted or not.
        self.close_scene(line.number.saturating_sub(1));

        let Some(caps) = SCENE_HEADING_STRICT.captures(heading) else {
            let suggestion =
                append_time_of_day(&heading.to_uppercase(), &self.options.default_time_of_day);
            self.question(
                QuestionableItem::new(
                    QuestionableKind::SceneHeading,
                    heading,
                    line.number,
                    "scene heading has no time of day",
                )
                .suggest(suggestion),
            );
            return;
        };

        let location = caps[2].trim().to_uppercase();
        if location.is_empty() {
            self.question(QuestionableItem::new(
                QuestionableKind::Location,
                heading,
                line.number,
                "scene heading names no location",
            ));
            return;
        }

        let location_type = LocationType::from_prefix(&caps[1]);
        self.add_location(&location, location_type);
        self.open = Some(Scene::open(heading, location, location_type, line.number));
    }

    fn forced_character(&mut self, line: &Line<'_>) {
        let name = clean_character_name(line.trimmed()).to_uppercase();
        if name.is_empty() {
            return;
        }
        if word_count(&name) > self.options.max_character_words {
            self.question(QuestionableItem::new(
                QuestionableKind::Character,
                line.trimmed(),
                line.number,
                self.too_many_words(),
            ));
            return;
        }
        self.add_character(&name);
        self.capture = Some(Capture {
            name,
            parts: Vec::new(),
        });
    }

    fn is_cue_candidate(line: &Line<'_>) -> bool {
        match line.kind {
            ElementType::Character => true,
            ElementType::Action => {
                let text = line.trimmed();
                line.follows_break()
                    && line.precedes_text()
                    && TITLE_CASE_NAME.is_match(text)
                    && !is_all_caps(text)
            }
            _ => false,
        }
    }

    fn character_cue(&mut self, line: &Line<'_>) {
        let name = clean_character_name(line.trimmed());
        if name.is_empty() || is_excluded_cue(&name.to_uppercase()) {
            return;
        }
        if !is_all_caps(&name) {
            self.question(
                QuestionableItem::new(
                    QuestionableKind::Character,
                    line.trimmed(),
                    line.number,
                    "character cue is not uppercase",
                )
                .suggest(name.to_uppercase()),
            );
            return;
        }
        if word_count(&name) > self.options.max_character_words {
            self.question(QuestionableItem::new(
                QuestionableKind::Character,
                line.trimmed(),
                line.number,
                self.too_many_words(),
            ));
            return;
        }
        self.add_character(&name);
    }

    fn too_many_words(&self) -> String {
        format!(
            "character cue has more than {} words",
            self.options.max_character_words
        )
    }
}

impl LineVisitor for Scanner<'_> {
    type Output = RawExtraction;

    fn visit(&mut self, line: &Line<'_>) {
        if self.capture.is_some() {
            if line.is_blank() || line.kind == ElementType::SceneHeading {
                self.end_capture();
            } else {
                if let Some(capture) = self.capture.as_mut() {
                    capture.parts.push(line.trimmed().to_string());
                }
                return;
            }
        }

        if line.kind == ElementType::SceneHeading {
            self.scene_heading(line);
        } else if line.trimmed().starts_with('@') {
            self.forced_character(line);
        } else if self.open.is_some() && Self::is_cue_candidate(line) {
            self.character_cue(line);
        }
    }

    fn finish(mut self, line_count: usize) -> Self::Output {
        self.end_capture();
        self.close_scene(line_count);
        self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slugline_core::walk_lines;

    fn scan(document: &str) -> RawExtraction {
        walk_lines(document, Scanner::new(&ExtractOptions::default()))
    }

    #[test]
    fn test_scan_scene_bounds() {
        let raw = scan("INT. KITCHEN - DAY\n\nJOHN\nHello.\n\nEXT. STREET - NIGHT\n\nSARAH\nHi.");
        assert_eq!(raw.scenes.len(), 2);
        assert_eq!((raw.scenes[0].start_line, raw.scenes[0].end_line), (1, 5));
        assert_eq!((raw.scenes[1].start_line, raw.scenes[1].end_line), (6, 9));
        assert_eq!(raw.characters, vec!["JOHN", "SARAH"]);
    }

    #[test]
    fn test_cues_outside_scenes_are_ignored() {
        let raw = scan("JOHN\nHello.\n\nINT. KITCHEN - DAY\n\nSARAH\nHi.");
        assert_eq!(raw.characters, vec!["SARAH"]);
    }

    #[test]
    fn test_heading_without_time_is_questionable() {
        let raw = scan("INT. KITCHEN - DAY\n\nJOHN\nHi.\n\nINT. OFFICE\n\nSARAH\nHello.");
        assert_eq!(raw.scenes.len(), 1);
        assert_eq!(raw.scenes[0].end_line, 5);
        assert_eq!(raw.characters, vec!["JOHN"]);
        assert_eq!(raw.questionable.len(), 1);
        let item = &raw.questionable[0];
        assert_eq!(item.kind, QuestionableKind::SceneHeading);
        assert_eq!(item.line_number, 6);
        assert_eq!(item.suggestion.as_deref(), Some("INT. OFFICE - DAY"));
    }

    #[test]
    fn test_dangling_dash_heading_suggestion() {
        let raw = scan("INT. KITCHEN -\n\nJOHN\nHi.");
        assert!(raw.locations.is_empty());
        assert_eq!(
            raw.questionable[0].suggestion.as_deref(),
            Some("INT. KITCHEN - DAY")
        );
    }

    #[test]
    fn test_heading_without_location_is_questionable() {
        let raw = scan("INT. - DAY\n\nJOHN\nHi.");
        assert!(raw.scenes.is_empty());
        assert!(raw.locations.is_empty());
        assert_eq!(raw.questionable[0].kind, QuestionableKind::Location);
    }

    #[test]
    fn test_title_case_cue_is_questionable() {
        let raw = scan("INT. KITCHEN - DAY\n\nSarah\nHello there.");
        assert!(raw.characters.is_empty());
        let item = &raw.questionable[0];
        assert_eq!(item.kind, QuestionableKind::Character);
        assert_eq!(item.suggestion.as_deref(), Some("SARAH"));
    }

    #[test]
    fn test_long_cue_is_questionable() {
        let raw = scan("INT. KITCHEN - DAY\n\nTHE MAN IN THE HAT\nHello.");
        assert!(raw.characters.is_empty());
        assert_eq!(raw.questionable[0].suggestion, None);
    }

    #[test]
    fn test_boilerplate_is_skipped() {
        let raw = scan("INT. KITCHEN - DAY\n\nFADE IN\n\nCHAPTER 2\n\nTHE END");
        assert!(raw.characters.is_empty());
        assert!(raw.questionable.is_empty());
    }

    #[test]
    fn test_forced_description() {
        let raw = scan(
            "@MARGARET\nA retired judge.\nSharp as ever.\n\nINT. COURT - DAY\n\n@Tom (V.O.)\nHer clerk.\nEXT. STEPS - DAY",
        );
        assert_eq!(raw.characters, vec!["MARGARET", "TOM"]);
        assert_eq!(
            raw.descriptions,
            vec![
                (
                    "MARGARET".to_string(),
                    "A retired judge. Sharp as ever.".to_string()
                ),
                ("TOM".to_string(), "Her clerk.".to_string()),
            ]
        );
        assert_eq!(raw.scenes[0].characters, vec!["TOM"]);
        assert_eq!(raw.scenes.len(), 2);
    }

    #[test]
    fn test_heading_on_last_line() {
        let raw = scan("INT. KITCHEN - DAY\n\nJOHN\nHi.\n\nEXT. ROOF - NIGHT");
        let last = raw.scenes.last().unwrap();
        assert_eq!(last.start_line, 6);
        assert_eq!(last.end_line, 6);
        assert_eq!(raw.scenes[0].end_line, 5);
    }

    #[test]
    fn test_first_seen_location_type_wins() {
        let raw = scan("INT. HOUSE - DAY\n\nEXT. HOUSE - NIGHT\n\nI/E CAR - DAY");
        assert_eq!(raw.locations.len(), 2);
        assert_eq!(raw.locations[0].location_type, LocationType::Int);
        assert_eq!(raw.locations[1].name, "CAR");
        assert_eq!(raw.locations[1].location_type, LocationType::IntExt);
        assert_eq!(raw.scenes[1].location_type, LocationType::Ext);
    }
}
