//! Scene, location and character extraction for slugline.
//!
//! Walks a screenplay with stricter rules than the parser and returns the
//! entities worth importing into a story database, plus the lines that look
//! like declarations but break a format rule.
//!
//! # Example
//!
//! ```
//! let doc = "INT. KITCHEN - DAY\n\nJOHN\nHello.\n\nEXT. STREET - NIGHT\n\nSARAH\nHi.";
//! assert!(slugline_extract::should_auto_import(doc));
//!
//! let result = slugline_extract::extract(doc);
//! assert_eq!(result.scenes.len(), 2);
//! assert_eq!(result.scenes[0].characters, vec!["JOHN"]);
//! ```

mod dedup;
mod scan;

pub use dedup::{NameMap, same_person};

use slugline_core::vocab::AUTO_IMPORT_GATE;
use slugline_core::{AutoImportResult, ExtractOptions, walk_lines};
use tracing::instrument;

use crate::scan::Scanner;

/// Whether a document has at least one line starting with a scene heading
/// prefix, in any case.
pub fn should_auto_import(text: &str) -> bool {
    AUTO_IMPORT_GATE.is_match(text)
}

/// Extract scenes, locations and characters.
pub fn extract(document: &str) -> AutoImportResult {
    extract_with_options(document, &ExtractOptions::default())
}

/// Extract scenes, locations and characters with options.
#[instrument(skip_all, fields(bytes = document.len()))]
pub fn extract_with_options(document: &str, options: &ExtractOptions) -> AutoImportResult {
    let raw = walk_lines(document, Scanner::new(options));
    let result = dedup::apply(raw, options.min_alias_len);

    tracing::debug!(
        scenes = result.scenes.len(),
        locations = result.locations.len(),
        characters = result.characters.len(),
        questionable = result.questionable_items.len(),
        "extracted entities"
    );
    result
}
