//! Horse name search (case-insensitive partial match)

use crate::types::Horse;

/// Lowercase one character at a time
///
/// `str::to_lowercase` maps a word-final Σ to ς, which a lone Σ typed as a
/// query would never match.
fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Normalized form of a search query, `None` if it is blank
///
/// `str::trim` strips Unicode whitespace, so an ideographic space (U+3000)
/// typed from a Japanese IME counts as blank too.
fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| fold_case(trimmed))
}

/// Whether `name` contains `query`, ignoring case; blank queries match nothing
pub fn matches_name(name: &str, query: &str) -> bool {
    normalize_query(query).is_some_and(|q| fold_case(name).contains(&q))
}

/// Horses whose name contains `query`, in input order
pub fn search_horses<'a>(horses: &'a [Horse], query: &str) -> Vec<&'a Horse> {
    let Some(query) = normalize_query(query) else {
        return Vec::new();
    };

    horses
        .iter()
        .filter(|h| fold_case(&h.name).contains(&query))
        .collect()
}
