use std::path::Path;

use super::{
    analyse::analyse_text,
    lexer::{tokenize, tokenize_strict, Lexed, Lexer},
    tokens::Token,
};
use crate::errors::errors::Error;

/// How a host finds this lexer: by name, alias, file name or MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerInfo {
    pub name: &'static str,
    pub url: &'static str,
    pub aliases: &'static [&'static str],
    pub filenames: &'static [&'static str],
    pub mimetypes: &'static [&'static str],
}

pub const VERSE: LexerInfo = LexerInfo {
    name: "Verse",
    url: "https://dev.epicgames.com/documentation/en-us/uefn/verse-language-reference",
    aliases: &["verse"],
    filenames: &["*.verse"],
    mimetypes: &["text/x-verse", "application/x-verse"],
};

impl LexerInfo {
    pub fn matches_alias(&self, alias: &str) -> bool {
        self.name.eq_ignore_ascii_case(alias)
            || self.aliases.iter().any(|known| known.eq_ignore_ascii_case(alias))
    }

    pub fn matches_mimetype(&self, mimetype: &str) -> bool {
        self.mimetypes.iter().any(|known| known.eq_ignore_ascii_case(mimetype.trim()))
    }

    /// Matches the file name of `path` against the filename globs. Only
    /// `*suffix` and exact-name globs occur in descriptors.
    pub fn matches_filename(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };

        self.filenames.iter().any(|glob| match glob.strip_prefix('*') {
            Some(suffix) => file_name.ends_with(suffix),
            None => file_name == *glob,
        })
    }
}

/// The Verse lexer as a host sees it.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerseLexer;

impl VerseLexer {
    pub fn info(&self) -> &'static LexerInfo {
        &VERSE
    }

    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        tokenize(source)
    }

    pub fn tokenize_strict(&self, source: &str) -> Result<Vec<Token>, Error> {
        tokenize_strict(source)
    }

    pub fn lex(&self, source: &str) -> Lexed {
        Lexer::new(source).run()
    }

    pub fn analyse_text(&self, text: &str) -> f64 {
        analyse_text(text)
    }
}
