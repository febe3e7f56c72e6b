#![allow(clippy::module_inception)]

use std::path::Path;

use crate::errors::errors::{Error, ErrorTip};

pub mod docs;
pub mod errors;
pub mod lexer;
pub mod macros;

extern crate regex;

pub use lexer::analyse::analyse_text;
pub use lexer::info::{LexerInfo, VerseLexer, VERSE};
pub use lexer::lexer::{tokenize, tokenize_strict, Lexed, Lexer, OpenState};
pub use lexer::rules::State;
pub use lexer::tokens::{coalesce, Token, TokenKind};

/// Byte offset into the lexed source. Offsets past `u32::MAX` saturate,
/// so sources of 4 GiB or more lose exact positions near the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(pub u32);

impl Position {
    pub fn null() -> Self {
        Position(0)
    }

    pub fn from_offset(offset: usize) -> Self {
        Position(u32::try_from(offset).unwrap_or(u32::MAX))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span {
            start: Position::from_offset(start),
            end: Position::from_offset(end),
        }
    }

    pub fn len(&self) -> usize {
        (self.end.0 - self.start.0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Returns the 1-based line number, the line text and the offset of
/// `position` inside that line, or `None` if `position` is past the end.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, &str, usize)> {
    let pos = position as usize;

    if pos >= content.len() {
        return None;
    }

    let mut start = 0;

    for (index, line) in content.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line, pos - start));
        }

        start = end;
    }

    None
}


/// Prints `error` in compiler-diagnostic form. `source` is the text the
/// error position refers to, if there is one.
pub fn display_error(error: &Error, origin: &Path, source: Option<&str>) {
    /*
        Error: UnterminatedState (...)
        -> VerseSyntaxValidation.md#07
           |
        3  | Msg := "unterminated {
           | --------^
    */

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }

    let Some((line, line_text, line_pos)) =
        source.and_then(|source| get_line_at_position(source, error.get_position().0))
    else {
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    eprintln!("-> {}", origin.as_os_str().to_string_lossy());
    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string.len() - string.trim_start_matches(' ').len();

    (&string[start..], start)
}
