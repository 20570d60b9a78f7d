// pinguard-keypad/src/layout/mod.rs
//! The physical keypad grid and its 8-neighbourhood.

/// Rows of the keypad, top to bottom. `*` and `#` are not digits and are never
/// part of a path.
pub const LAYOUT: [[u8; 3]; 4] = [
    [b'1', b'2', b'3'],
    [b'4', b'5', b'6'],
    [b'7', b'8', b'9'],
    [b'*', b'0', b'#'],
];

const ROWS: isize = 4;
const COLS: isize = 3;

/// Offsets of the eight surrounding keys, diagonals included.
const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// A key on the grid, addressed by row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyPosition {
    pub row: usize,
    pub col: usize,
}

impl KeyPosition {
    /// The ASCII label printed on the key.
    pub fn label(self) -> u8 {
        LAYOUT[self.row][self.col]
    }

    /// True for keys `0`-`9`.
    pub fn is_digit(self) -> bool {
        self.label().is_ascii_digit()
    }

    /// Digit keys reachable in one move, in a fixed order.
    pub fn neighbours(self) -> impl Iterator<Item = KeyPosition> {
        let row = self.row as isize;
        let col = self.col as isize;
        NEIGHBOUR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let (r, c) = (row + dr, col + dc);
            if !(0..ROWS).contains(&r) || !(0..COLS).contains(&c) {
                return None;
            }
            let pos = KeyPosition { row: r as usize, col: c as usize };
            pos.is_digit().then_some(pos)
        })
    }
}

/// Every digit key in reading order (1..9, then 0).
pub fn digit_keys() -> impl Iterator<Item = KeyPosition> {
    (0..ROWS as usize)
        .flat_map(|row| (0..COLS as usize).map(move |col| KeyPosition { row, col }))
        .filter(|pos| pos.is_digit())
}

/// Locates the key carrying `digit`.
pub fn position_of(digit: u8) -> Option<KeyPosition> {
    digit_keys().find(|pos| pos.label() == digit)
}

/// True when `b` can be pressed directly after `a` without skipping a key.
pub fn are_adjacent(a: u8, b: u8) -> bool {
    match (position_of(a), position_of(b)) {
        (Some(from), Some(to)) => from.neighbours().any(|n| n == to),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn ten_digit_keys() {
        assert_eq!(digit_keys().count(), 10);
        assert!(position_of(b'*').is_none());
        assert!(position_of(b'#').is_none());
    }

    #[test]
    fn centre_key_touches_every_other_non_zero_digit() {
        let five = position_of(b'5').unwrap();
        let mut labels: Vec<u8> = five.neighbours().map(KeyPosition::label).collect();
        labels.sort_unstable();
        assert_eq!(labels, b"12346789".to_vec());
    }

    #[test]
    fn zero_is_only_reachable_from_bottom_row() {
        let zero = position_of(b'0').unwrap();
        let mut labels: Vec<u8> = zero.neighbours().map(KeyPosition::label).collect();
        labels.sort_unstable();
        assert_eq!(labels, b"789".to_vec());
        assert!(!are_adjacent(b'5', b'0'));
        assert!(are_adjacent(b'7', b'0'));
    }

    #[test]
    fn a_key_is_not_its_own_neighbour() {
        assert!(!are_adjacent(b'5', b'5'));
        assert!(!are_adjacent(b'1', b'3'));
    }
}
