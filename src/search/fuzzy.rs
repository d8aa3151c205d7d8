/// Classic Levenshtein distance (insert, delete, substitute at cost 1),
/// computed over chars with a rolling row.
pub fn edit_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let insert_cost = prev[j + 1] + 1;
            let delete_cost = curr[j] + 1;
            let replace_cost = prev[j] + usize::from(ca != cb);
            curr[j + 1] = insert_cost.min(delete_cost).min(replace_cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Approximate prefix match: the query is compared against only the first
/// `len(query) + 2` chars of the candidate, so "btata" still finds
/// "batata doce" without paying for the full candidate.
pub fn is_fuzzy_match(query: &str, candidate: &str, max_distance: usize) -> bool {
    let window: String = candidate
        .chars()
        .take(query.chars().count() + 2)
        .collect();
    edit_distance(query, &window) <= max_distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("batata", "batata"), 0);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("btata", "batata"), 1);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("acai", "abacaxi"), 3);
    }

    #[test]
    fn test_fuzzy_match_window() {
        assert!(is_fuzzy_match("btata", "batata", 2));
        assert!(is_fuzzy_match("batata", "batata doce", 2));
        assert!(!is_fuzzy_match("xyz", "batata", 2));
        // Only the prefix window counts: a match deep inside the candidate
        // is the substring path's job, not this one's.
        assert!(!is_fuzzy_match("doce", "batata doce", 2));
    }
}
