//! Property-based tests for the screenplay pipeline.
//!
//! Documents are generated from a mix of well-formed and sloppy screenplay
//! lines so that every classifier rule and every validator rule gets hit.

use proptest::prelude::*;
use slugline_core::vocab::{SCENE_HEADING_PREFIX, clean_character_name, is_excluded_cue};
use slugline_core::{ElementType, EmitOptions, IssueKind};
use slugline_extract as extract;
use slugline_lint as lint;
use slugline_read_fountain as read;
use slugline_write_fountain as write;

/// One screenplay-ish line.
fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Scene headings, some sloppy
        "(INT|EXT|int|ext|EST|I/E|INT\\./EXT)\\. [A-Z][A-Z ]{0,12}( - (DAY|NIGHT))?",
        // Cues
        "[A-Z]{2,10}( [A-Z]{2,6})?( \\(V\\.O\\.\\))?( \\^)?",
        // Title-case names
        "[A-Z][a-z]{2,8}",
        // Action and dialogue
        "[A-Za-z][A-Za-z ,.!?']{0,40}",
        // Colon shorthand
        "[a-z]{3,8}: [a-z ]{1,20}",
        // Parentheticals
        "\\([a-z ]{1,12}\\)",
        // Markup
        Just("CUT TO:".to_string()),
        Just("===".to_string()),
        Just("THE END".to_string()),
        Just("# Act One".to_string()),
        Just("[[note]]".to_string()),
        // Blank lines, weighted up
        Just(String::new()),
        Just(String::new()),
        Just("  ".to_string()),
    ]
}

fn document_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(line_strategy(), 0..40).prop_map(|lines| lines.join("\n"))
}

fn kinds(document: &str) -> Vec<ElementType> {
    read::parse(document).into_iter().map(|e| e.kind).collect()
}

mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_classification_invariants(doc in document_strategy()) {
            for element in read::parse(&doc) {
                let text = element.text.trim();
                match element.kind {
                    ElementType::SceneHeading => {
                        prop_assert!(SCENE_HEADING_PREFIX.is_match(text), "{:?}", text);
                    }
                    ElementType::Character => {
                        prop_assert!(!text.chars().any(char::is_lowercase), "{:?}", text);
                        prop_assert!(!is_excluded_cue(&clean_character_name(text)), "{:?}", text);
                    }
                    _ => {}
                }
            }
        }

        #[test]
        fn test_one_element_per_line(doc in document_strategy()) {
            let elements = read::parse(&doc);
            prop_assert_eq!(elements.len(), doc.split('\n').count());
            for (index, element) in elements.iter().enumerate() {
                prop_assert_eq!(element.line_number, index + 1);
            }
        }

        #[test]
        fn test_emit_round_trip(doc in document_strategy()) {
            let elements = read::parse(&doc);
            prop_assert_eq!(kinds(&write::emit(&elements)), kinds(&doc));

            let options = EmitOptions { strip_trailing_whitespace: true, trailing_newline: false };
            prop_assert_eq!(kinds(&write::emit_with_options(&elements, &options)), kinds(&doc));
        }

        #[test]
        fn test_correct_fixes_spacing(doc in document_strategy()) {
            let issues = lint::validate(&doc).issues;
            let corrected = lint::correct(&doc, &issues).corrected_content;

            let revalidated = lint::validate(&corrected);
            prop_assert!(
                revalidated.issues_of(IssueKind::Spacing).next().is_none(),
                "{:?}",
                corrected
            );
            prop_assert!(lint::correct(&corrected, &[]).is_unchanged());
        }

        #[test]
        fn test_quick_correct_is_idempotent(doc in document_strategy()) {
            let once = lint::quick_correct(&doc).corrected_content;
            prop_assert!(lint::quick_correct(&once).is_unchanged());
        }

        #[test]
        fn test_extraction_is_consistent(doc in document_strategy()) {
            let result = extract::extract(&doc);
            let line_count = doc.split('\n').count();

            for scene in &result.scenes {
                prop_assert!(scene.start_line <= scene.end_line);
                prop_assert!(scene.end_line <= line_count);
                for name in &scene.characters {
                    prop_assert!(result.character(name).is_some(), "{} missing", name);
                }
            }
            for pair in result.scenes.windows(2) {
                prop_assert!(pair[0].end_line < pair[1].start_line);
            }

            let mut names: Vec<&str> = result.character_names().collect();
            names.sort_unstable();
            names.dedup();
            prop_assert_eq!(names.len(), result.characters.len());
        }

        #[test]
        fn test_headings_trigger_auto_import(doc in document_strategy()) {
            if kinds(&doc).contains(&ElementType::SceneHeading) {
                prop_assert!(extract::should_auto_import(&doc));
            }
        }
    }
}

mod specific_tests {
    use super::*;

    #[test]
    fn test_kitchen_street_example() {
        let doc = "INT. KITCHEN - DAY\n\nJOHN\nHello.\n\nEXT. STREET - NIGHT\n\nSARAH\nHi.";
        let result = extract::extract(doc);
        assert_eq!(result.scenes.len(), 2);
        assert_eq!(result.characters.len(), 2);
        assert_eq!(result.scenes[0].location, "KITCHEN");
        assert_eq!(result.scenes[1].location, "STREET");
    }

    #[test]
    fn test_sarah_chen_everywhere() {
        let doc = "@SARAH\nA chemist.\n\nINT. LAB - DAY\n\nSARAH\nReady.\n\nEXT. YARD - DAY\n\nSARAH CHEN\nGo.";
        let result = extract::extract(doc);
        assert_eq!(result.character_names().collect::<Vec<_>>(), ["SARAH CHEN"]);
        assert_eq!(result.character_description("SARAH CHEN"), Some("A chemist."));
        assert!(result.scenes.iter().all(|s| s.characters == ["SARAH CHEN"]));
    }
}
