use crate::models::TokenPath;

/// Theme states moved directly in front of the leaf name.
const STATE_SEGMENTS: &[&str] = &["light", "dark"];

/// How a token path is turned into a platform identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameConvention {
    /// `color-primary-light-default`
    Kebab,
    /// `ColorPrimaryLightDefault`
    Pascal,
}

/// Build the identifier for a leaf path.
pub fn identifier(path: &TokenPath, convention: NameConvention) -> String {
    let words = canonical_segments(path)
        .into_iter()
        .flat_map(split_words);

    match convention {
        NameConvention::Kebab => words
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join("-"),
        NameConvention::Pascal => words.map(|w| capitalize(&w)).collect(),
    }
}

/// Path segments in naming order: a state segment found above the leaf's
/// parent is moved to sit directly before the leaf.
pub fn canonical_segments(path: &TokenPath) -> Vec<&str> {
    let mut segments: Vec<&str> = path.segments().iter().map(String::as_str).collect();
    let len = segments.len();
    if len < 3 {
        return segments;
    }

    let state_at = segments[..len - 1]
        .iter()
        .rposition(|s| STATE_SEGMENTS.contains(s));
    if let Some(index) = state_at {
        if index != len - 2 {
            let state = segments.remove(index);
            segments.insert(len - 2, state);
        }
    }
    segments
}

/// Split a segment into words on separators and lower-to-upper boundaries.
fn split_words(segment: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for c in segment.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        let boundary = c.is_uppercase()
            && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit());
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev = Some(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
