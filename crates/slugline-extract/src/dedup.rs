//! Merging near-duplicate character names.
//!
//! Screenplays often cue the same person as `SARAH` in one scene and
//! `SARAH CHEN` in another. Names are visited longest first; a name that
//! equals an accepted canonical name, or appears in one as a whole word, maps
//! to it. Otherwise it becomes canonical itself.
//!
//! The merge is greedy and single-pass. Nested names such as `ANN` and
//! `MARY ANN` are merged even when they belong to different people.

use std::collections::HashMap;

use regex::Regex;
use slugline_core::{AutoImportResult, Character, Scene};

use crate::scan::RawExtraction;

/// Maps every seen name to its canonical form.
#[derive(Debug, Clone, Default)]
pub struct NameMap {
    canonical: Vec<String>,
    aliases: HashMap<String, String>,
}

impl NameMap {
    /// Build the map for a set of names. Duplicates in `names` are ignored.
    pub fn build<S: AsRef<str>>(names: &[S], min_alias_len: usize) -> Self {
        let mut sorted: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
        sorted.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        sorted.dedup();

        let mut map = NameMap::default();
        for name in sorted {
            let target = map
                .canonical
                .iter()
                .find(|canonical| same_person(canonical, name, min_alias_len))
                .cloned();
            let target = match target {
                Some(canonical) => {
                    tracing::trace!(alias = name, canonical = %canonical, "merged character name");
                    canonical
                }
                None => {
                    map.canonical.push(name.to_string());
                    name.to_string()
                }
            };
            map.aliases.insert(name.to_string(), target);
        }
        map
    }

    /// Canonical form of `name`; unknown names map to themselves.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, String::as_str)
    }

    /// Canonical names, longest first.
    pub fn canonical_names(&self) -> &[String] {
        &self.canonical
    }

    /// Number of names that were folded into a different canonical name.
    pub fn merged_count(&self) -> usize {
        self.aliases
            .iter()
            .filter(|(alias, canonical)| alias != canonical)
            .count()
    }
}

/// Whether `shorter` names the same person as `longer`.
///
/// True for equal names, or when `shorter` has at least `min_alias_len`
/// characters and occurs in `longer` as a whole word.
pub fn same_person(longer: &str, shorter: &str, min_alias_len: usize) -> bool {
    longer == shorter
        || (shorter.chars().count() >= min_alias_len && contains_word(longer, shorter))
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    !needle.is_empty()
        && Regex::new(&format!(r"\b{}\b", regex::escape(needle)))
            .is_ok_and(|word| word.is_match(haystack))
}

/// Fold raw scan output through a [`NameMap`].
pub(crate) fn apply(raw: RawExtraction, min_alias_len: usize) -> AutoImportResult {
    let map = NameMap::build(&raw.characters, min_alias_len);

    let mut characters: Vec<Character> = Vec::new();
    for name in &raw.characters {
        let canonical = map.resolve(name);
        if !characters.iter().any(|c| c.name == canonical) {
            characters.push(Character::new(canonical));
        }
    }

    for (name, description) in raw.descriptions {
        let canonical = map.resolve(&name);
        if let Some(character) = characters.iter_mut().find(|c| c.name == canonical) {
            character.description = Some(match character.description.take() {
                Some(existing) => format!("{existing} {description}"),
                None => description,
            });
        }
    }

    let scenes = raw
        .scenes
        .into_iter()
        .map(|mut scene: Scene| {
            let names = std::mem::take(&mut scene.characters);
            for name in &names {
                scene.add_character(map.resolve(name));
            }
            scene
        })
        .collect();

    tracing::debug!(
        names = raw.characters.len(),
        canonical = characters.len(),
        merged = map.merged_count(),
        "deduplicated character names"
    );

    AutoImportResult {
        locations: raw.locations,
        characters,
        scenes,
        questionable_items: raw.questionable,
    }
}
