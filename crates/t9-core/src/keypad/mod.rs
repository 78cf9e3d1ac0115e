//! Phone-keypad lexicon.
//!
//! Relates the 12 keypad keys (`0`–`9`, `*`, `#`) to the text symbols they can
//! produce, validates key sequences, and maps text back to the keys that
//! would type it.

mod table;

use table::{ALPHABET, LAYOUT};

/// One unit of text: a raw byte of the training or test text.
pub type Symbol = u8;

/// A physical keypad key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Star,
    Hash,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeypadError {
    #[error("invalid key sequence: byte 0x{byte:02x} at position {position} is not a keypad key")]
    InvalidKeySequence { position: usize, byte: u8 },
    #[error("symbol 0x{symbol:02x} at position {position} is not produced by any key")]
    UnmappedSymbol { position: usize, symbol: Symbol },
}

impl Key {
    pub const ALL: [Key; 12] = [
        Key::Zero,
        Key::One,
        Key::Two,
        Key::Three,
        Key::Four,
        Key::Five,
        Key::Six,
        Key::Seven,
        Key::Eight,
        Key::Nine,
        Key::Star,
        Key::Hash,
    ];

    pub fn from_byte(byte: u8) -> Option<Key> {
        match byte {
            b'0'..=b'9' => Some(Key::ALL[(byte - b'0') as usize]),
            b'*' => Some(Key::Star),
            b'#' => Some(Key::Hash),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Key::Star => b'*',
            Key::Hash => b'#',
            digit => b'0' + digit as u8,
        }
    }

    /// Symbols this key can produce, in layout order.
    pub fn symbols(self) -> &'static [Symbol] {
        LAYOUT[self as usize].1
    }

    pub fn produces(self, symbol: Symbol) -> bool {
        self.symbols().contains(&symbol)
    }

    /// Likelihood that pressing this key was meant to produce `symbol`.
    ///
    /// `p` for the key's own symbols, `1 - p` for everything else. With
    /// `p = 1.0` a symbol the key cannot produce gets probability 0.
    pub fn press_probability(self, symbol: Symbol, p: f64) -> f64 {
        if self.produces(symbol) {
            p
        } else {
            1.0 - p
        }
    }
}

/// The full symbol alphabet, in layout order. Every candidate-tree level
/// carries one child per entry.
pub fn alphabet() -> &'static [Symbol] {
    ALPHABET
}

/// Reverse lookup: the key that produces `symbol`.
pub fn key_for_symbol(symbol: Symbol) -> Option<Key> {
    LAYOUT
        .iter()
        .find(|(_, symbols)| symbols.contains(&symbol))
        .map(|&(key, _)| key)
}

/// Validate a key sequence and convert it to keys.
///
/// Fails on the first byte that is not one of the 12 keypad keys.
pub fn parse_keys(sequence: &[u8]) -> Result<Vec<Key>, KeypadError> {
    sequence
        .iter()
        .enumerate()
        .map(|(position, &byte)| {
            Key::from_byte(byte).ok_or(KeypadError::InvalidKeySequence { position, byte })
        })
        .collect()
}

/// Convert text to the key presses that would type it.
pub fn keys_for_text(text: &[Symbol]) -> Result<Vec<Key>, KeypadError> {
    text.iter()
        .enumerate()
        .map(|(position, &symbol)| {
            key_for_symbol(symbol).ok_or(KeypadError::UnmappedSymbol { position, symbol })
        })
        .collect()
}
