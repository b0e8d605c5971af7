//! Key/value pair sorting.
//!
//! Input is a flat list of tokens separated by single spaces, read two at a
//! time as `key value`. The pairs are stable-sorted by key (byte order) and
//! the values are written back out in that order.
//!
//! ## Example
//!
//! ```rust
//! use pairsort::second_ordered_by_first;
//!
//! let out = second_ordered_by_first("a3 n2 a1 n3 a2 n1").unwrap();
//! assert_eq!(out, "n3 n1 n2");
//! ```

use crate::error::{Malformed, Result, SortError};
use serde::Serialize;

pub const SEPARATOR: char = ' ';

/// A key and its value, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pair<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Split on single spaces. Empty input has no tokens.
pub fn tokenize(input: &str) -> Result<Vec<&str>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let tokens: Vec<&str> = input.split(SEPARATOR).collect();
    if let Some(position) = tokens.iter().position(|t| t.is_empty()) {
        return Err(Malformed::EmptyToken { position }.into());
    }
    Ok(tokens)
}

/// Group tokens as `(key, value)` in input order.
pub fn parse_pairs(input: &str) -> Result<Vec<Pair<'_>>> {
    let tokens = tokenize(input)?;

    let mut chunks = tokens.chunks_exact(2);
    let pairs: Vec<Pair<'_>> = chunks
        .by_ref()
        .map(|kv| Pair {
            key: kv[0],
            value: kv[1],
        })
        .collect();

    if let [key] = chunks.remainder() {
        return Err(SortError::MalformedInput(Malformed::DanglingKey {
            key: key.to_string(),
            position: tokens.len() - 1,
        }));
    }

    Ok(pairs)
}

/// Stable sort by key; equal keys keep their input order.
pub fn sort_pairs(pairs: &mut [Pair<'_>]) {
    pairs.sort_by(|a, b| a.key.as_bytes().cmp(b.key.as_bytes()));
}

pub fn sorted_pairs(input: &str) -> Result<Vec<Pair<'_>>> {
    let mut pairs = parse_pairs(input)?;
    sort_pairs(&mut pairs);
    Ok(pairs)
}

pub fn join_values(pairs: &[Pair<'_>]) -> String {
    let mut out = String::new();
    for (i, pair) in pairs.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(pair.value);
    }
    out
}

/// Values of `input`, ordered by their keys.
pub fn second_ordered_by_first(input: &str) -> Result<String> {
    let pairs = sorted_pairs(input)?;
    Ok(join_values(&pairs))
}

/// Keys seen more than once, each reported once. Expects sorted pairs.
pub fn duplicate_keys<'a>(pairs: &[Pair<'a>]) -> Vec<&'a str> {
    let mut dups: Vec<&str> = Vec::new();
    for w in pairs.windows(2) {
        if w[0].key == w[1].key && dups.last() != Some(&w[0].key) {
            dups.push(w[0].key);
        }
    }
    dups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(second_ordered_by_first("").unwrap(), "");
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_already_sorted() {
        assert_eq!(
            second_ordered_by_first("a1 n1 a2 n2 a3 n3").unwrap(),
            "n1 n2 n3"
        );
    }

    #[test]
    fn test_partially_sorted() {
        assert_eq!(
            second_ordered_by_first("a1 n1 a3 n3 a2 n2").unwrap(),
            "n1 n2 n3"
        );
    }

    #[test]
    fn test_reversed() {
        assert_eq!(
            second_ordered_by_first("a3 n3 a2 n2 a1 n1").unwrap(),
            "n1 n2 n3"
        );
    }

    #[test]
    fn test_values_follow_keys() {
        assert_eq!(
            second_ordered_by_first("a3 n2 a1 n3 a2 n1").unwrap(),
            "n3 n1 n2"
        );
    }

    #[test]
    fn test_single_pair() {
        assert_eq!(second_ordered_by_first("k v").unwrap(), "v");
    }

    #[test]
    fn test_dangling_key() {
        let err = second_ordered_by_first("a1").unwrap_err();
        assert_eq!(
            err,
            SortError::MalformedInput(Malformed::DanglingKey {
                key: "a1".to_string(),
                position: 0
            })
        );

        let err = second_ordered_by_first("a1 n1 a2").unwrap_err();
        assert_eq!(err.position(), 2);
    }

    #[test]
    fn test_extra_whitespace_is_malformed() {
        assert_eq!(tokenize("a  b").unwrap_err().position(), 1);
        assert_eq!(tokenize(" a b").unwrap_err().position(), 0);
        assert_eq!(tokenize("a b ").unwrap_err().position(), 2);
        assert!(second_ordered_by_first(" ").is_err());
    }

    #[test]
    fn test_tab_is_not_a_separator() {
        assert_eq!(second_ordered_by_first("a\tb c").unwrap(), "c");
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        assert_eq!(second_ordered_by_first("k b k a").unwrap(), "b a");
        assert_eq!(second_ordered_by_first("z 1 k b a 0 k a").unwrap(), "0 b a 1");
    }

    #[test]
    fn test_byte_order() {
        // Uppercase sorts before lowercase, "a10" before "a2".
        assert_eq!(second_ordered_by_first("b 1 B 2").unwrap(), "2 1");
        assert_eq!(second_ordered_by_first("a2 x a10 y").unwrap(), "y x");
    }

    #[test]
    fn test_parse_pairs_keeps_input_order() {
        let pairs = parse_pairs("b 2 a 1").unwrap();
        assert_eq!(
            pairs,
            vec![
                Pair { key: "b", value: "2" },
                Pair { key: "a", value: "1" }
            ]
        );
    }

    #[test]
    fn test_duplicate_keys() {
        let pairs = sorted_pairs("k 1 a 2 k 3 a 4 k 5 z 6").unwrap();
        assert_eq!(duplicate_keys(&pairs), vec!["a", "k"]);
        assert!(duplicate_keys(&sorted_pairs("a 1 b 2").unwrap()).is_empty());
    }

    #[test]
    fn test_join_values_empty() {
        assert_eq!(join_values(&[]), "");
    }
}
