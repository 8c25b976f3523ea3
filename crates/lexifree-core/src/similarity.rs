use std::collections::HashSet;

/// Jaccard similarity above which two texts count as near-duplicates.
pub const JACCARD_SIMILARITY_CUTOFF: f64 = 0.23;

/// Consecutive whitespace-delimited word pairs.
pub fn bigrams(text: &str) -> HashSet<(&str, &str)> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words.windows(2).map(|pair| (pair[0], pair[1])).collect()
}

/// Bigram Jaccard similarity, or `None` when neither text has a bigram.
pub fn jaccard(a: &str, b: &str) -> Option<f64> {
    let left = bigrams(a);
    let right = bigrams(b);

    let union = left.union(&right).count();
    if union == 0 {
        return None;
    }

    let intersection = left.intersection(&right).count();
    Some(intersection as f64 / union as f64)
}

/// True when `a` and `b` share enough phrasing to need a rewrite.
///
/// Texts too short to form any bigram are never similar.
pub fn are_texts_similar(a: &str, b: &str) -> bool {
    jaccard(a, b).is_some_and(|similarity| similarity > JACCARD_SIMILARITY_CUTOFF)
}
