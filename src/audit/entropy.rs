//! Heuristic entropy estimate: `length * max(1, log2(distinct chars))`.
//!
//! Not Shannon entropy.  It grows with both length and alphabet
//! diversity, which is all the threshold check needs.  Length and the
//! distinct set are both counted in Unicode scalar values.

use std::collections::HashSet;

/// Estimate the entropy of `s` in bits, rounded to the nearest integer.
pub fn estimate_entropy(s: &str) -> u32 {
    if s.is_empty() {
        return 0;
    }

    let length = s.chars().count() as f64;
    let unique = s.chars().collect::<HashSet<char>>().len() as f64;

    (length * unique.log2().max(1.0)).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_zero() {
        assert_eq!(estimate_entropy(""), 0);
    }

    #[test]
    fn single_repeated_char_equals_length() {
        assert_eq!(estimate_entropy("a"), 1);
        assert_eq!(estimate_entropy("aaaaaaaa"), 8);
    }

    #[test]
    fn two_distinct_chars_floor_at_one_bit() {
        // log2(2) == 1, same as the floor.
        assert_eq!(estimate_entropy("abab"), 4);
    }

    #[test]
    fn matches_formula() {
        for pw in ["password", "Tr0ub4dor&3xyz!", "123456", "ÅÄÖåäö", "correct horse"] {
            let n = pw.chars().count() as f64;
            let u = pw.chars().collect::<HashSet<_>>().len() as f64;
            let expected = (n * u.log2().max(1.0)).round() as u32;
            assert_eq!(estimate_entropy(pw), expected, "mismatch for {pw}");
        }
    }

    #[test]
    fn known_values() {
        // 8 chars, 7 distinct: 8 * log2(7) = 22.46
        assert_eq!(estimate_entropy("password"), 22);
        // 15 chars, 14 distinct: 15 * log2(14) = 57.11
        assert_eq!(estimate_entropy("Tr0ub4dor&3xyz!"), 57);
    }

    #[test]
    fn case_sensitive() {
        assert!(estimate_entropy("aAaA") > estimate_entropy("aaaa"));
    }
}
