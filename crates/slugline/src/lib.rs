//! Slugline - Fountain screenplay processing
//!
//! Slugline reads plain-text screenplays written in Fountain and provides:
//! - A per-line element stream for syntax-aware editors
//! - Cursor-scoped context (current scene, speakers, act)
//! - Extraction of scenes, locations and characters for import
//! - Format validation with suggested fixes, and auto-correction
//!
//! # Quick Start
//!
//! ```rust
//! use slugline::prelude::*;
//!
//! let doc = "INT. KITCHEN - DAY\n\nJOHN\nHello.";
//!
//! let elements = slugline::read::parse(doc);
//! assert_eq!(elements[2].kind, ElementType::Character);
//!
//! let entities = slugline::extract::extract(doc);
//! assert_eq!(entities.scenes[0].characters, vec!["JOHN"]);
//!
//! assert!(slugline::lint::validate(doc).is_valid);
//! ```
//!
//! # Features
//!
//! - `read` - Parser and cursor context (default)
//! - `extract` - Entity extraction and name deduplication (default)
//! - `lint` - Validation and correction (default)
//! - `write` - Fountain writer
//! - `serde` - `Serialize`/`Deserialize` for every result type
//! - `all` - Everything except `serde`
//!
//! # Architecture
//!
//! Every pass is built on the context-sensitive line classifier in
//! `slugline-core`: a line's type depends on its text and the type of the line
//! before it. The parser, extractor and validator each walk the document once
//! with that classifier; the corrector rewrites lines with a pipeline of
//! passes. All of it is total over any `&str`.

// Re-export core types
pub use slugline_core::*;

/// Fountain parsing and cursor context.
#[cfg(feature = "read")]
pub mod read {
    pub use slugline_read_fountain::*;
}

/// Fountain writing.
#[cfg(feature = "write")]
pub mod write {
    pub use slugline_write_fountain::*;
}

/// Entity extraction.
#[cfg(feature = "extract")]
pub mod extract {
    pub use slugline_extract::*;
}

/// Validation and correction.
#[cfg(feature = "lint")]
pub mod lint {
    pub use slugline_lint::*;
}

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        AutoImportResult, CorrectionResult, ElementType, Fix, FormatIssue, FountainElement,
        IssueKind, LocationType, Severity, ValidationResult,
    };
}
