//! Delimited-text parsing.
//!
//! The scanner is deliberately small: a double quote toggles quoted mode and
//! is dropped, the delimiter splits fields only outside quotes, and every
//! field is trimmed. There is no doubled-quote escaping.

use std::fmt;

use cmap_model::Grid;
use serde::{Deserialize, Serialize};

/// Field delimiter choice offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
}

impl Delimiter {
    pub const fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Tab => '\t',
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Comma => "comma",
            Self::Tab => "tab",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses delimited text into a grid.
///
/// Lines that are blank after trimming are dropped, so the row count always
/// equals the number of non-blank lines. Never fails.
pub fn parse(text: &str, delimiter: char) -> Grid {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_line(line, delimiter))
        .collect::<Vec<_>>()
        .into()
}

/// Splits one line into trimmed fields.
///
/// An odd number of quotes leaves quoted mode open until the end of the line,
/// so any later delimiters become part of the last field.
pub fn parse_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == delimiter && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }

    fields.push(current.trim().to_string());
    fields
}
