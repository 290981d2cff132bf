use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Integer code of the end-of-payload marker.
pub const PSEUDO_EOF: u16 = 256;

/// Integer code carried by internal tree nodes.
pub const NOT_A_CHAR: u16 = 257;

/// A leaf value of the tree: a literal byte or one of the two markers.
///
/// Variants are declared in code order so the derived `Ord` matches
/// [`Symbol::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Symbol {
    Byte(u8),
    PseudoEof,
    NotAChar,
}

impl Symbol {
    pub fn code(self) -> u16 {
        match self {
            Symbol::Byte(b) => b as u16,
            Symbol::PseudoEof => PSEUDO_EOF,
            Symbol::NotAChar => NOT_A_CHAR,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0..=255 => Some(Symbol::Byte(code as u8)),
            PSEUDO_EOF => Some(Symbol::PseudoEof),
            NOT_A_CHAR => Some(Symbol::NotAChar),
            _ => None,
        }
    }
}

impl From<u8> for Symbol {
    fn from(b: u8) -> Self {
        Symbol::Byte(b)
    }
}

impl From<Symbol> for u16 {
    fn from(s: Symbol) -> Self {
        s.code()
    }
}

impl TryFrom<u16> for Symbol {
    type Error = Error;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Symbol::from_code(code)
            .ok_or_else(|| Error::MalformedHeader(format!("{} is not a symbol code", code)))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
