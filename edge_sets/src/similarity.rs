//! Fuzzy matching between edge names from OpenStreetMap and the names people actually use for a
//! road ("VCI", "Via de Cintura Interna", ...).
//!
//! Both strings are normalized first: lowercased, then transliterated to ASCII so that
//! diacritics don't matter. A name matches an alias if either contains the other, or if their
//! normalized Levenshtein similarity, `1 - distance / max(len1, len2)` counted in characters,
//! exceeds a threshold.

use sumo::Network;

use crate::EdgeSet;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// The names of the Porto ring road and its main junctions.
pub const DEFAULT_ALIASES: [&str; 5] = [
    "vci",
    "via de cintura interna",
    "ic23",
    "no de coimbroes",
    "Nó do Areinho",
];

pub fn normalize(s: &str) -> String {
    deunicode::deunicode(&s.to_lowercase())
}

/// The minimum number of single-character insertions, deletions, and substitutions to turn one
/// string into the other.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1: Vec<char> = s1.chars().collect();
    let s2: Vec<char> = s2.chars().collect();
    if s1.is_empty() {
        return s2.len();
    }
    if s2.is_empty() {
        return s1.len();
    }

    // Only the previous row of the matrix is needed
    let mut prev: Vec<usize> = (0..=s2.len()).collect();
    let mut current = vec![0; s2.len() + 1];
    for (i, c1) in s1.iter().enumerate() {
        current[0] = i + 1;
        for (j, c2) in s2.iter().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            current[j + 1] = (prev[j + 1] + 1)
                .min(current[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut current);
    }
    prev[s2.len()]
}

/// In [0, 1], comparing the normalized forms. Identical strings score 1.
pub fn similarity(s1: &str, s2: &str) -> f64 {
    let s1 = normalize(s1);
    let s2 = normalize(s2);
    normalized_similarity(&s1, &s2)
}

fn normalized_similarity(s1: &str, s2: &str) -> f64 {
    let longest = s1.chars().count().max(s2.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - (levenshtein_distance(s1, s2) as f64) / (longest as f64)
}

pub struct NameMatcher {
    pub threshold: f64,
}

impl NameMatcher {
    pub fn new(threshold: f64) -> NameMatcher {
        NameMatcher { threshold }
    }

    /// Empty strings never match anything.
    pub fn is_alias(&self, name: &str, alias: &str) -> bool {
        if name.is_empty() || alias.is_empty() {
            return false;
        }
        let name = normalize(name);
        let alias = normalize(alias);
        // Some characters transliterate to nothing
        if name.is_empty() || alias.is_empty() {
            return false;
        }
        if name.contains(&alias) || alias.contains(&name) {
            return true;
        }
        normalized_similarity(&name, &alias) > self.threshold
    }

    pub fn is_aliases<S: AsRef<str>>(&self, name: &str, aliases: &[S]) -> bool {
        aliases.iter().any(|alias| self.is_alias(name, alias.as_ref()))
    }
}

impl Default for NameMatcher {
    fn default() -> NameMatcher {
        NameMatcher::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

/// Every edge whose name matches one of the aliases.
pub fn named_edges<S: AsRef<str>>(
    network: &Network,
    aliases: &[S],
    matcher: &NameMatcher,
) -> EdgeSet {
    network
        .all_edges()
        .filter(|e| matcher.is_aliases(&e.name, aliases))
        .map(|e| e.id.clone())
        .collect()
}
