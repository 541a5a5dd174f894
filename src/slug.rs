use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s-]+").unwrap());
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s-]+").unwrap());

/// Turn arbitrary text into a lowercase, hyphen-separated slug.
///
/// Characters outside `[a-z0-9]`, whitespace and `-` are dropped, runs of
/// whitespace or hyphens become a single hyphen, and hyphens at either end
/// are trimmed. Empty input gives an empty slug.
pub fn slugify(text: &str) -> String {
    let lowercase = text.to_lowercase();
    let kept = DISALLOWED.replace_all(&lowercase, "");
    let joined = SEPARATORS.replace_all(&kept, "-");
    joined.trim_matches('-').to_string()
}

/// Guess a human title from a slug: `lebus-house` becomes `Lebus House`.
pub fn title_from_slug(slug: &str) -> String {
    let mut title = String::with_capacity(slug.len());
    let mut after_letter = false;
    for ch in slug.replace('-', " ").chars() {
        if ch.is_alphabetic() {
            if after_letter {
                title.extend(ch.to_lowercase());
            } else {
                title.extend(ch.to_uppercase());
            }
            after_letter = true;
        } else {
            title.push(ch);
            after_letter = false;
        }
    }
    title
}
