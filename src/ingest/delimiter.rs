use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
}

impl Delimiter {
    /// Detection order. Earlier entries win ties.
    pub const CANDIDATES: [Delimiter; 3] = [Delimiter::Comma, Delimiter::Semicolon, Delimiter::Tab];

    pub fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Semicolon => ';',
            Self::Tab => '\t',
        }
    }

    pub fn as_byte(self) -> u8 {
        self.as_char() as u8
    }
}

impl Display for Delimiter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Comma => "comma",
            Self::Semicolon => "semicolon",
            Self::Tab => "tab",
        };
        write!(f, "{display}")
    }
}

/// Picks the candidate that splits `header_line` into the most columns.
pub fn detect_delimiter(header_line: &str) -> Delimiter {
    let mut best = Delimiter::Comma;
    let mut best_columns = 0usize;
    for candidate in Delimiter::CANDIDATES {
        let columns = header_line.split(candidate.as_char()).count();
        if columns > best_columns {
            best = candidate;
            best_columns = columns;
        }
    }
    best
}
