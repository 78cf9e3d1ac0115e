//! Static keypad layout.
//!
//! Each key lists the symbols it can produce, in the order they are offered.
//! Letters appear lowercase first, then uppercase, then the key's own digit.

use super::Key;

pub(super) const LAYOUT: [(Key, &[u8]); 12] = [
    (Key::Zero, b"0"),
    (Key::One, b".,1"),
    (Key::Two, b"aAbBcC2"),
    (Key::Three, b"dDeEfF3"),
    (Key::Four, b"gGhHiI4"),
    (Key::Five, b"jJkKlL5"),
    (Key::Six, b"mMnNoO6"),
    (Key::Seven, b"pPqQrRsS7"),
    (Key::Eight, b"tTuUvV8"),
    (Key::Nine, b"wWxXyYzZ9"),
    (Key::Star, b""),
    (Key::Hash, b" "),
];

/// Every symbol reachable from some key, in layout order.
pub(super) const ALPHABET: &[u8] = concat!(
    "0",
    ".,1",
    "aAbBcC2",
    "dDeEfF3",
    "gGhHiI4",
    "jJkKlL5",
    "mMnNoO6",
    "pPqQrRsS7",
    "tTuUvV8",
    "wWxXyYzZ9",
    "",
    " "
)
.as_bytes();
