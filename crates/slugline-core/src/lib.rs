//! slugline-core: Screenplay element model and line classification.
//!
//! This crate provides the types shared by every slugline pass, the
//! context-sensitive Fountain line classifier, and the line walker the
//! parser, extractor and validator are built on.

mod classify;
mod element;
mod entity;
mod issue;
mod traits;
pub mod vocab;
mod walk;

pub use classify::*;
pub use element::*;
pub use entity::*;
pub use issue::*;
pub use traits::*;
pub use walk::*;
