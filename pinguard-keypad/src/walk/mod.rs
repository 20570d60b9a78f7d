// pinguard-keypad/src/walk/mod.rs
//! Exhaustive depth-first walks over the keypad adjacency graph.
//!
//! A walk starts on any digit key and moves to one of its 8-neighbours at every
//! step. Keys may be revisited (so "5858" is a walk), but a key is never pressed
//! twice in a row. Every walk of the requested length is collected.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::KeyPath;
use crate::layout::{are_adjacent, digit_keys, KeyPosition};

/// Collects every adjacency walk of exactly `length` keys.
///
/// Returns an empty set for `length == 0`. The result is ordered, so two calls
/// with the same length always yield the same sequence.
pub fn walk_paths(length: usize) -> BTreeSet<KeyPath> {
    let mut paths = BTreeSet::new();
    if length == 0 {
        return paths;
    }

    let mut buffer: Vec<u8> = Vec::with_capacity(length);
    for start in digit_keys() {
        buffer.clear();
        buffer.push(start.label());
        extend_walk(start, length, &mut buffer, &mut paths);
    }
    paths
}

fn extend_walk(at: KeyPosition, length: usize, buffer: &mut Vec<u8>, paths: &mut BTreeSet<KeyPath>) {
    if buffer.len() == length {
        // Labels are ASCII digits by construction.
        paths.insert(buffer.iter().map(|&b| b as char).collect());
        return;
    }

    for next in at.neighbours() {
        buffer.push(next.label());
        extend_walk(next, length, buffer, paths);
        buffer.pop();
    }
}

/// True when every consecutive pair of digits in `pin` are keypad neighbours.
pub fn is_adjacency_path(pin: &str) -> bool {
    let bytes = pin.as_bytes();
    !bytes.is_empty()
        && bytes.iter().all(u8::is_ascii_digit)
        && bytes.windows(2).all(|pair| are_adjacent(pair[0], pair[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_key_walks_are_the_digits() {
        let paths = walk_paths(1);
        assert_eq!(paths.len(), 10);
        assert!(paths.contains("0"));
    }

    #[test]
    fn four_key_walks_follow_columns_and_diagonals() {
        let paths = walk_paths(4);
        for pin in ["2580", "1478", "3698", "8520", "1236", "5858"] {
            assert!(paths.contains(pin), "expected walk {pin}");
        }
        // 7 -> 8 -> 9 -> 4 skips over 5 and 6.
        assert!(!paths.contains("7894"));
        assert!(!paths.contains("8193"));
        assert!(!paths.contains("1111"));
        // 1 -> 6 is not a neighbour step.
        assert!(!paths.contains("3216"));
    }

    #[test]
    fn every_walk_has_requested_length_and_is_adjacent() {
        for length in [4usize, 6] {
            let paths = walk_paths(length);
            assert!(!paths.is_empty());
            assert!(paths.iter().all(|p| p.len() == length && is_adjacency_path(p)));
        }
    }

    #[test]
    fn walk_is_deterministic() {
        assert_eq!(walk_paths(4), walk_paths(4));
    }

    #[test]
    fn zero_length_walk_is_empty() {
        assert!(walk_paths(0).is_empty());
        assert!(!is_adjacency_path(""));
        assert!(!is_adjacency_path("12a4"));
    }
}
