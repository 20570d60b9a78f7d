// pinguard-keypad/src/lib.rs
//! Geometry of the 4x3 telephone keypad used to derive "shape" PINs.
//!
//! The crate is `no_std` (with `alloc`) so the walk can be embedded anywhere the
//! core library goes. It knows nothing about dates, reasons or corpora.
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod layout;
pub mod walk;
pub mod patterns;

pub use layout::{are_adjacent, position_of, KeyPosition, LAYOUT};
pub use patterns::{named_patterns, NamedPattern, PatternShape};
pub use walk::{is_adjacency_path, walk_paths};

/// A keypad path rendered as the digits pressed, in order.
pub type KeyPath = alloc::string::String;
