// pinguard-keypad/src/patterns/mod.rs
//! Named keypad shapes that the adjacency walk cannot reach.
//!
//! Wrap-arounds (`7890` -> `789123`), knight's moves and multi-segment shapes
//! jump between non-adjacent keys, so they are listed explicitly here rather
//! than derived. Some entries are also reachable by the walk; keeping them in
//! the table is harmless.

/// The geometric family a named pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatternShape {
    Vertical,
    Horizontal,
    Diagonal,
    KnightMove,
    Zigzag,
    Snake,
    Wrap,
    Row,
    Column,
    Circular,
}

/// A shape with a human-readable label and the digits it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedPattern {
    pub name: &'static str,
    pub digits: &'static str,
    pub shape: PatternShape,
}

const fn named(name: &'static str, digits: &'static str, shape: PatternShape) -> NamedPattern {
    NamedPattern { name, digits, shape }
}

static FOUR_DIGIT: &[NamedPattern] = &[
    named("middle column down", "2580", PatternShape::Vertical),
    named("middle column up", "0852", PatternShape::Vertical),
    named("left column down", "1470", PatternShape::Vertical),
    named("left column up", "0741", PatternShape::Vertical),
    named("right column down", "3690", PatternShape::Vertical),
    named("right column up", "0963", PatternShape::Vertical),
    named("top row left to right", "1234", PatternShape::Horizontal),
    named("top row right to left", "4321", PatternShape::Horizontal),
    named("middle row left to right", "4567", PatternShape::Horizontal),
    named("middle row right to left", "7654", PatternShape::Horizontal),
    named("bottom row left to right", "7890", PatternShape::Horizontal),
    named("bottom row right to left", "0987", PatternShape::Horizontal),
    named("falling diagonal", "1357", PatternShape::Diagonal),
    named("rising diagonal", "7531", PatternShape::Diagonal),
    named("cross diagonal", "3159", PatternShape::Diagonal),
    named("cross diagonal reversed", "9513", PatternShape::Diagonal),
    named("bottom row then left", "7894", PatternShape::Row),
    named("middle row then top", "4561", PatternShape::Row),
    named("top row back then down", "3216", PatternShape::Snake),
    named("right column then across", "3698", PatternShape::Snake),
    named("z through centre", "1593", PatternShape::Zigzag),
    named("middle column up from bottom", "8520", PatternShape::Vertical),
    named("left column up to zero", "7410", PatternShape::Vertical),
    named("middle row run", "5678", PatternShape::Horizontal),
];

static SIX_DIGIT: &[NamedPattern] = &[
    named("top and middle rows", "123456", PatternShape::Row),
    named("middle and bottom rows", "456789", PatternShape::Row),
    named("two columns down", "147258", PatternShape::KnightMove),
    named("left down, middle up", "147852", PatternShape::KnightMove),
    named("bottom then middle row", "789456", PatternShape::Row),
    named("reverse snake", "321654", PatternShape::Snake),
    named("left-right zigzag", "159753", PatternShape::Zigzag),
    named("right-left zigzag", "753159", PatternShape::Zigzag),
    named("right column then middle up", "963852", PatternShape::Column),
    named("right diagonal snake", "852963", PatternShape::Snake),
    named("left column then middle", "741852", PatternShape::Column),
    named("middle then right column", "258963", PatternShape::Column),
    named("two columns down reversed", "258147", PatternShape::KnightMove),
    named("right then middle column", "369258", PatternShape::Column),
    named("circular sweep", "963147", PatternShape::Circular),
    named("snake", "123654", PatternShape::Snake),
    named("bottom row wrapping to top", "789123", PatternShape::Wrap),
];

/// The named shapes for a PIN of `length` digits. Lengths without a table
/// return an empty slice.
pub fn named_patterns(length: usize) -> &'static [NamedPattern] {
    match length {
        4 => FOUR_DIGIT,
        6 => SIX_DIGIT,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_match_their_length() {
        for length in [4usize, 6] {
            let table = named_patterns(length);
            assert!(!table.is_empty());
            assert!(table.iter().all(|p| p.digits.len() == length));
            assert!(table.iter().all(|p| p.digits.bytes().all(|b| b.is_ascii_digit())));
        }
        assert!(named_patterns(5).is_empty());
    }

    #[test]
    fn wrap_around_shapes_are_listed() {
        assert!(named_patterns(4).iter().any(|p| p.digits == "7894"));
        assert!(named_patterns(6).iter().any(|p| p.digits == "789123" && p.shape == PatternShape::Wrap));
    }

    #[test]
    fn non_adjacent_snakes_are_listed() {
        assert!(named_patterns(4).iter().any(|p| p.digits == "3216" && p.shape == PatternShape::Snake));
        assert!(!crate::walk::is_adjacency_path("3216"));
    }
}
