//! Screenplay vocabulary: heading prefixes, boilerplate cues, and the patterns
//! built from them.

use std::sync::LazyLock;

use regex::Regex;

/// Scene heading prefixes, most specific first.
pub const SCENE_PREFIXES: &[&str] = &["INT./EXT", "INT/EXT", "I./E", "I/E", "INT", "EXT", "EST"];

/// Regex alternation of [`SCENE_PREFIXES`]. Combined prefixes come before
/// `INT` because the first matching alternative wins.
pub const PREFIX_PATTERN: &str = r"INT\./EXT|INT/EXT|I\./E|I/E|INT|EXT|EST";

/// Time of day appended to headings that lack one.
pub const DEFAULT_TIME_OF_DAY: &str = "DAY";

/// Character cues are shorter than this many characters.
pub const MAX_CUE_LEN: usize = 40;

/// A line that starts with a heading prefix. Group 1 is the prefix as written.
pub static SCENE_HEADING_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^({PREFIX_PATTERN})[.\s]")).expect("valid heading prefix pattern")
});

/// `PREFIX LOCATION - TIME`. Groups: prefix, location, time.
///
/// The location runs to the last spaced dash, so `HOUSE - KITCHEN - NIGHT`
/// keeps `HOUSE - KITCHEN` as the location.
pub static SCENE_HEADING_STRICT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^({PREFIX_PATTERN})(?:\.\s*|\s+)(.*?)\s+[-–—]+\s*([^-–—]*[^-–—\s])\s*$"
    ))
    .expect("valid strict heading pattern")
});

/// Any line of a document that starts with a heading prefix.
pub static AUTO_IMPORT_GATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?im)^[ \t]*({PREFIX_PATTERN})[. \t]")).expect("valid gate pattern")
});

/// An uppercase cue: name characters, an optional `(EXTENSION)` and an
/// optional dual-dialogue `^`.
pub static CHARACTER_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{Lu}\d '’#]*\p{Lu}[\p{Lu}\d '’#]*(?:\s*\([\p{Lu}\d .'’\-]+\))?\s*\^?$")
        .expect("valid cue pattern")
});

/// Capitalised words, e.g. `Sarah Chen` or `Old Man (V.O.)`.
pub static TITLE_CASE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{Lu}[\p{L}'’\-]*(?:\s+\p{Lu}[\p{L}'’\-]*){0,5}(?:\s*\([^()]*\))?$")
        .expect("valid name pattern")
});

static NARRATIVE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:CHAPTER|PART|ACT|BOOK|EPISODE|VOLUME|SCENE|SEQUENCE)\s+(?:\d+|[IVXLC]+|ONE|TWO|THREE|FOUR|FIVE|SIX|SEVEN|EIGHT|NINE|TEN|ELEVEN|TWELVE)|PROLOGUE|EPILOGUE|INTERLUDE|INTERMISSION|PREFACE|INTRODUCTION|COLD OPEN|TEASER)$",
    )
    .expect("valid narrative heading pattern")
});

/// Uppercase lines that look like cues but are screenplay boilerplate.
pub const BOILERPLATE: &[&str] = &[
    "THE END",
    "END",
    "FADE IN",
    "FADE OUT",
    "FADE TO BLACK",
    "FADE TO WHITE",
    "CONT'D",
    "CONT’D",
    "CONTINUED",
    "MORE",
    "BLACKOUT",
    "BLACK",
    "SMASH CUT",
    "MATCH CUT",
    "JUMP CUT",
    "INTERCUT",
    "MONTAGE",
    "END MONTAGE",
    "SERIES OF SHOTS",
    "END SERIES OF SHOTS",
    "BACK TO SCENE",
    "FLASHBACK",
    "END FLASHBACK",
    "TITLE CARD",
    "SUPER",
    "LATER",
    "MOMENTS LATER",
    "CONTINUOUS",
    "OMITTED",
    "TO BE CONTINUED",
];

/// Keys recognised on a title page.
pub const TITLE_PAGE_KEYS: &[&str] = &[
    "title",
    "credit",
    "author",
    "authors",
    "source",
    "draft date",
    "contact",
    "copyright",
    "notes",
];

/// Labels that precede a colon in prose without naming a speaker.
pub const PROSE_LABELS: &[&str] = &[
    "NOTE", "PS", "P.S", "WARNING", "UPDATE", "TIP", "EDIT", "EXAMPLE", "QUESTION", "ANSWER",
    "SUMMARY", "LOGLINE", "GENRE", "THEME", "SETTING", "TIME", "PLACE", "DATE", "SCENE",
];

/// Speech verbs used in prose dialogue attribution.
pub const ATTRIBUTION_VERBS: &str = "said|says|asked|asks|replied|replies|shouted|shouts|whispered|whispers|yelled|yells|muttered|mutters|exclaimed|exclaims|answered|answers|added|adds|continued|continues|cried|cries";

/// Subject pronouns, which never name a speaker.
pub const PRONOUNS: &[&str] = &["I", "HE", "SHE", "IT", "WE", "THEY", "YOU"];

/// Words that end a line naming a place.
pub const LOCATION_NOUNS: &[&str] = &[
    "ALLEY", "APARTMENT", "ATTIC", "BACKYARD", "BAR", "BARN", "BASEMENT", "BATHROOM", "BEACH",
    "BEDROOM", "BRIDGE", "BUILDING", "CABIN", "CAFE", "CAMPUS", "CAR", "CASTLE", "CAVE",
    "CHURCH", "CLASSROOM", "CLUB", "CORRIDOR", "COURTROOM", "DESERT", "DINER", "DOCK", "DORM",
    "ESTATE", "FARM", "FIELD", "FOREST", "GARAGE", "GARDEN", "GYM", "HALL", "HALLWAY",
    "HARBOR", "HIGHWAY", "HOSPITAL", "HOTEL", "HOUSE", "KITCHEN", "LAB", "LABORATORY", "LAKE",
    "LIBRARY", "LOBBY", "LOT", "MANSION", "MARKET", "MOTEL", "MOUNTAIN", "MUSEUM", "OFFICE",
    "PALACE", "PARK", "PLANE", "POOL", "PRECINCT", "PRISON", "RESTAURANT", "RIVER", "ROAD",
    "ROOF", "ROOFTOP", "ROOM", "SCHOOL", "SHIP", "SHOP", "STATION", "STORE", "STREET",
    "STUDIO", "TEMPLE", "THEATER", "TOWER", "TOWN", "TRAIN", "TUNNEL", "VILLAGE", "WAREHOUSE",
    "WOODS", "YARD",
];

/// At least one letter and no lowercase letters.
pub fn is_all_caps(text: &str) -> bool {
    text.chars().any(char::is_alphabetic) && !text.chars().any(char::is_lowercase)
}

/// Whether a cleaned, uppercase cue is screenplay boilerplate.
pub fn is_boilerplate(name: &str) -> bool {
    BOILERPLATE.contains(&name.trim())
}

/// Whether a cleaned, uppercase cue looks like `CHAPTER 3` or `PROLOGUE`.
pub fn is_narrative_heading(name: &str) -> bool {
    NARRATIVE_HEADING.is_match(name.trim())
}

/// Boilerplate or narrative heading.
pub fn is_excluded_cue(name: &str) -> bool {
    is_boilerplate(name) || is_narrative_heading(name)
}

/// Whether `key` (any case) is a title page key.
pub fn is_title_page_key(key: &str) -> bool {
    let key = key.trim().to_lowercase();
    TITLE_PAGE_KEYS.contains(&key.as_str())
}

/// Whether an uppercase word names a kind of place.
pub fn is_location_noun(word: &str) -> bool {
    LOCATION_NOUNS.contains(&word)
}

/// Lines starting with `#`, `@` or `[`: sections, forced cues, notes.
pub fn is_tag_line(text: &str) -> bool {
    text.trim_start().starts_with(['#', '@', '['])
}

/// `heading - TIME`, dropping any dash the heading already trails with.
pub fn append_time_of_day(heading: &str, time_of_day: &str) -> String {
    let base =
        heading.trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '–' | '—'));
    format!("{base} - {time_of_day}")
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Reduce a cue to the bare name: drops a leading `@`, the dual-dialogue `^`
/// and trailing extensions such as `(V.O.)` or `(CONT'D)`, and collapses
/// inner whitespace. Case is preserved.
pub fn clean_character_name(text: &str) -> String {
    let mut name = text.trim().trim_start_matches('@').trim();
    name = name.trim_end_matches('^').trim_end();
    while name.ends_with(')') {
        match name.rfind('(') {
            Some(open) => name = name[..open].trim_end(),
            None => break,
        }
    }
    name = name.trim_end_matches('^').trim_end();
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}
