use std::collections::HashSet;

use crate::models::CourseItem;

/// Keywords marking an item as foundational material
pub const FOUNDATIONAL_KEYWORDS: &[&str] = &[
    "foundation",
    "foundations",
    "foundational",
    "introduction",
    "intro",
    "fundamentals",
    "basics",
    "essentials",
    "beginners",
    "prerequisite",
];

/// Words too common to count as a characteristic match
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "your", "from", "into", "that", "this", "of", "to", "a", "an",
    "in", "on", "by", "or",
];

/// Lowercased word set of a piece of text
///
/// Splits on anything that is not alphanumeric, so `self-inquiry`
/// yields `self` and `inquiry`.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_lowercase())
        .collect()
}

/// Word set over every free-text field of a course
pub fn item_tokens(item: &CourseItem) -> HashSet<String> {
    let mut tokens = tokenize(&item.title);
    tokens.extend(tokenize(&item.description));
    tokens.extend(tokenize(&item.path));
    for tag in &item.tags {
        tokens.extend(tokenize(tag));
    }
    tokens
}

/// Whether every word of `keyword` appears in `tokens`
#[inline]
pub fn contains_keyword(tokens: &HashSet<String>, keyword: &str) -> bool {
    let words = tokenize(keyword);
    !words.is_empty() && words.iter().all(|w| tokens.contains(w))
}

/// Number of distinct keywords found in `tokens`
pub fn count_keyword_hits(tokens: &HashSet<String>, keywords: &[String]) -> usize {
    let distinct: HashSet<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    distinct.iter().filter(|k| contains_keyword(tokens, k)).count()
}

/// Whether any significant word of `phrase` appears in `tokens`
pub fn phrase_matches(tokens: &HashSet<String>, phrase: &str) -> bool {
    tokenize(phrase)
        .iter()
        .filter(|word| word.chars().count() > 2 && !STOPWORDS.contains(&word.as_str()))
        .any(|word| tokens.contains(word))
}

/// Foundational items are recognised from title and description only
pub fn is_foundational(item: &CourseItem) -> bool {
    let mut tokens = tokenize(&item.title);
    tokens.extend(tokenize(&item.description));
    FOUNDATIONAL_KEYWORDS.iter().any(|k| tokens.contains(*k))
}
