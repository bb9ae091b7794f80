//! The `similarity` module provides the edit-distance primitives underlying the fuzzy matching
//! strategies.
/// The `levenshtein` function computes the classic edit distance between two strings using the
/// two-row formulation, counting insertions, deletions and substitutions at unit cost.
pub fn levenshtein(left: &str, right: &str) -> usize {
    let left: Vec<char> = left.chars().collect();
    let right: Vec<char> = right.chars().collect();
    if left.is_empty() {
        return right.len();
    }
    if right.is_empty() {
        return left.len();
    }

    let mut prev: Vec<usize> = (0..=right.len()).collect();
    let mut curr: Vec<usize> = vec![0; right.len() + 1];

    for (i, left_char) in left.iter().enumerate() {
        curr[0] = i + 1;
        for (j, right_char) in right.iter().enumerate() {
            let cost = usize::from(left_char != right_char);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            let substitution = prev[j] + cost;
            curr[j + 1] = deletion.min(insertion).min(substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[right.len()]
}

/// The `similarity` function derives a normalized ratio in `[0, 1]` from the edit distance.
/// Empty input on either side reads as zero similarity; equal strings read as one.
pub fn similarity(left: &str, right: &str) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    if left == right {
        return 1.0;
    }
    let distance = levenshtein(left, right) as f64;
    let max_len = left.chars().count().max(right.chars().count()) as f64;
    (1.0 - distance / max_len).clamp(0.0, 1.0)
}
