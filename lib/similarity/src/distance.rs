//! Similarity functions for the three match signals
//!
//! Every public scorer returns an integer percentage in [0, 100] where 100
//! means identical. The raw embedding similarity is also exposed because its
//! gate is applied before clipping.

use ahash::AHashMap;
use pawmatch_core::Vector;

/// Calculate breed-name similarity between two breed strings
///
/// Both sides are lower-cased, then compared with a bigram Dice
/// coefficient. Commutative.
///
/// # Returns
/// `round(coefficient * 100)` in [0, 100]
pub fn breed_similarity(a: &str, b: &str) -> u8 {
    let coefficient = dice_coefficient(&a.to_lowercase(), &b.to_lowercase());
    to_percent(coefficient)
}

/// Bigram Dice coefficient over the whitespace-stripped strings
///
/// Bigrams are counted as a multiset, so repeated pairs ("aaaa") only match
/// as often as they occur on both sides.
pub fn dice_coefficient(a: &str, b: &str) -> f32 {
    let a: Vec<char> = a.chars().filter(|c| !c.is_whitespace()).collect();
    let b: Vec<char> = b.chars().filter(|c| !c.is_whitespace()).collect();

    if a == b {
        return 1.0;
    }
    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }

    let mut bigrams: AHashMap<(char, char), usize> = AHashMap::with_capacity(a.len());
    for w in a.windows(2) {
        *bigrams.entry((w[0], w[1])).or_insert(0) += 1;
    }

    let mut intersection = 0usize;
    for w in b.windows(2) {
        if let Some(count) = bigrams.get_mut(&(w[0], w[1])) {
            if *count > 0 {
                *count -= 1;
                intersection += 1;
            }
        }
    }

    (2 * intersection) as f32 / (a.len() + b.len() - 2) as f32
}

/// Raw embedding similarity: `(1 - cosine_distance) * 100`, rounded to two
/// decimals and capped at 100
///
/// May be negative for opposed embeddings.
pub fn embedding_similarity(e1: &Vector, e2: &Vector) -> f32 {
    let value = (1.0 - e1.cosine_distance(e2)) * 100.0;
    let rounded = (value * 100.0).round() / 100.0;
    rounded.min(100.0)
}

/// Integer embedding score for a candidate, clipped to [0, 100]
pub fn embedding_score(raw: f32) -> u8 {
    raw.round().clamp(0.0, 100.0) as u8
}

/// Color similarity between two normalized histograms: `round(cosine * 100)`
pub fn color_similarity(h1: &Vector, h2: &Vector) -> u8 {
    to_percent(h1.cosine_similarity(h2))
}

#[inline]
fn to_percent(value: f32) -> u8 {
    (value * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breed_case_insensitive() {
        assert_eq!(breed_similarity("Aspin", "aspin"), 100);
        assert_eq!(breed_similarity("SHIH TZU", "shih tzu"), 100);
    }

    #[test]
    fn test_breed_commutative() {
        let pairs = [
            ("Shih Tzu", "Shitzu"),
            ("Golden Retriever", "Labrador Retriever"),
            ("aaaa", "aa"),
            ("Poodle", ""),
            ("Beagle", "Bagel"),
        ];
        for (a, b) in pairs {
            assert_eq!(breed_similarity(a, b), breed_similarity(b, a), "{a} vs {b}");
        }
    }

    #[test]
    fn test_breed_known_values() {
        // "night" / "nacht": only "ht" shared out of 4 + 4 bigrams
        assert_eq!(breed_similarity("night", "nacht"), 25);
        assert_eq!(breed_similarity("Poodle", "Dalmatian"), 0);
        assert!(breed_similarity("Shih Tzu", "Shitzu") >= 50);
    }

    #[test]
    fn test_breed_degenerate_inputs() {
        assert_eq!(breed_similarity("", ""), 100);
        assert_eq!(breed_similarity("a", "ab"), 0);
        assert_eq!(breed_similarity("Aspin", ""), 0);
        // whitespace is ignored entirely
        assert_eq!(breed_similarity("Shih Tzu", "ShihTzu"), 100);
    }

    #[test]
    fn test_dice_multiset_bigrams() {
        // "aaaa" has three "aa" bigrams, "aa" only one
        let c = dice_coefficient("aaaa", "aa");
        assert!((c - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_embedding_similarity_identical() {
        let e = Vector::new(vec![0.3, 0.1, 0.7, 0.2, 0.9]);
        let raw = embedding_similarity(&e, &e);
        assert_eq!(raw, 100.0);
        assert_eq!(embedding_score(raw), 100);
    }

    #[test]
    fn test_embedding_similarity_can_be_negative() {
        let a = Vector::new(vec![1.0, 0.0]);
        let b = Vector::new(vec![-1.0, 0.0]);
        let raw = embedding_similarity(&a, &b);
        assert_eq!(raw, -100.0);
        assert_eq!(embedding_score(raw), 0);
    }

    #[test]
    fn test_embedding_similarity_two_decimals() {
        let a = Vector::new(vec![1.0, 0.0]);
        let b = Vector::new(vec![1.0, 1.0]);
        // cos = 0.70710678
        assert!((embedding_similarity(&a, &b) - 70.71).abs() < 1e-3);
    }

    #[test]
    fn test_color_similarity() {
        let h = Vector::new(vec![0.25, 0.25, 0.5, 0.0]);
        assert_eq!(color_similarity(&h, &h), 100);

        let a = Vector::new(vec![1.0, 0.0, 0.0, 0.0]);
        let b = Vector::new(vec![0.0, 1.0, 0.0, 0.0]);
        assert_eq!(color_similarity(&a, &b), 0);
    }
}
