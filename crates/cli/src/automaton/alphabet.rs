// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Symbol alphabets.
//!
//! An automaton is built over exactly one alphabet:
//! - [`Unicode`]: codepoints of a `&str` (default)
//! - [`Bytes`]: raw bytes of a `&[u8]`
//!
//! The alphabet is a type parameter of the automaton, so the two modes cannot
//! be mixed within one automaton.

use std::fmt;

use serde::{Deserialize, Serialize};

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Unicode {}
    impl Sealed for super::Bytes {}
}

/// Runtime tag for an alphabet, used by config and persisted automata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphabetKind {
    /// Unicode scalar values.
    #[default]
    Unicode,
    /// Raw bytes.
    Bytes,
}

impl fmt::Display for AlphabetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlphabetKind::Unicode => f.write_str("unicode"),
            AlphabetKind::Bytes => f.write_str("bytes"),
        }
    }
}

/// A symbol alphabet.
///
/// Symbols are reduced to a `u32` code inside the automaton; the alphabet
/// decides how text is split into symbols.
pub trait Alphabet: sealed::Sealed + Send + Sync + 'static {
    /// Runtime tag for this alphabet.
    const KIND: AlphabetKind;

    /// Borrowed text type (`str` or `[u8]`).
    type Text: ?Sized;

    /// A single symbol.
    type Symbol: Copy;

    /// Iterator over the symbols of a text.
    type Symbols<'t>: Iterator<Item = Self::Symbol> + Clone;

    /// Split text into symbols.
    fn symbols(text: &Self::Text) -> Self::Symbols<'_>;

    /// Numeric code of a symbol.
    fn code(symbol: Self::Symbol) -> u32;
}

/// Unicode codepoint alphabet. Text is `&str`, positions count `char`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unicode;

/// Raw byte alphabet. Text is `&[u8]`, positions count bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bytes;

impl Alphabet for Unicode {
    const KIND: AlphabetKind = AlphabetKind::Unicode;
    type Text = str;
    type Symbol = char;
    type Symbols<'t> = std::str::Chars<'t>;

    #[inline]
    fn symbols(text: &str) -> Self::Symbols<'_> {
        text.chars()
    }

    #[inline]
    fn code(symbol: char) -> u32 {
        symbol as u32
    }
}

impl Alphabet for Bytes {
    const KIND: AlphabetKind = AlphabetKind::Bytes;
    type Text = [u8];
    type Symbol = u8;
    type Symbols<'t> = std::iter::Copied<std::slice::Iter<'t, u8>>;

    #[inline]
    fn symbols(text: &[u8]) -> Self::Symbols<'_> {
        text.iter().copied()
    }

    #[inline]
    fn code(symbol: u8) -> u32 {
        u32::from(symbol)
    }
}

/// Encode a text into symbol codes.
pub(crate) fn encode<A: Alphabet>(text: &A::Text) -> Vec<u32> {
    A::symbols(text).map(A::code).collect()
}
