//! Fountain format validation and auto-correction for slugline.
//!
//! [`validate`] reports format issues line by line, most with a suggested
//! fix. [`correct`] applies those fixes and repairs spacing around scene
//! headings and character cues.
//!
//! # Example
//!
//! ```
//! let doc = "int. office\n\njohn: hi there";
//! let result = slugline_lint::validate(doc);
//! assert!(!result.is_valid);
//!
//! let corrected = slugline_lint::correct(doc, &result.issues);
//! assert_eq!(corrected.corrected_content, "INT. OFFICE - DAY\n\nJOHN\nhi there");
//! ```

mod correct;
mod validate;

pub use correct::{ApplySuggestedFixes, Pipeline, QuickCorrect, SpacingPass, correct, quick_correct};
pub use validate::{validate, validate_with_options};
