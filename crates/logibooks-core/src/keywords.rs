//! Search matching for the key words list.

use crate::types::KeyWord;

/// Case-insensitive substring match of `query` against a key word.
///
/// Matches the word itself or any associated FEACN code. A missing query
/// or key word never matches.
#[must_use]
pub fn matches(query: Option<&str>, keyword: Option<&KeyWord>) -> bool {
    let (Some(query), Some(keyword)) = (query, keyword) else {
        return false;
    };

    let needle = query.to_lowercase();
    keyword.word.to_lowercase().contains(&needle)
        || keyword
            .feacn_codes
            .iter()
            .any(|code| code.to_lowercase().contains(&needle))
}

/// Keep the key words matching `query`, preserving order.
#[must_use]
pub fn filter<'a>(query: &str, keywords: &'a [KeyWord]) -> Vec<&'a KeyWord> {
    keywords
        .iter()
        .filter(|kw| matches(Some(query), Some(kw)))
        .collect()
}
