//! Utility macros for the lexer.
//!
//! This module defines helper macros used by the rule table and the driver:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_RULE!` - Creates a lexer rule from a pattern, an action and an optional transition
//!
//! These macros keep the rule table readable as a flat, ordered list.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::NumberInteger, "42".to_string(), Span::new(0, 2));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a lexer rule.
///
/// The first form emits the whole match as one token kind. The
/// `bygroups(...)` form emits one token per capture group, in order.
/// Either form takes an optional trailing `Transition`.
///
/// # Example
///
/// ```ignore
/// MK_RULE!(r"\s+", TokenKind::Whitespace),
/// MK_RULE!(r"<#", TokenKind::CommentMultiline, Transition::Push(State::MultilineComment)),
/// MK_RULE!(r"(using)(\s*)(\{)",
///     bygroups(TokenKind::KeywordNamespace, TokenKind::Whitespace, TokenKind::Punctuation),
///     Transition::Push(State::UsingBlock)),
/// ```
#[macro_export]
macro_rules! MK_RULE {
    ($pattern:expr, bygroups($($kind:expr),+ $(,)?)) => {
        $crate::MK_RULE!($pattern, bygroups($($kind),+), $crate::lexer::rules::Transition::None)
    };
    ($pattern:expr, bygroups($($kind:expr),+ $(,)?), $transition:expr) => {
        $crate::lexer::rules::Rule::new(
            &$pattern,
            $crate::lexer::rules::Action::ByGroups(&[$($kind),+]),
            $transition,
        )
    };
    ($pattern:expr, $kind:expr) => {
        $crate::MK_RULE!($pattern, $kind, $crate::lexer::rules::Transition::None)
    };
    ($pattern:expr, $kind:expr, $transition:expr) => {
        $crate::lexer::rules::Rule::new(
            &$pattern,
            $crate::lexer::rules::Action::Token($kind),
            $transition,
        )
    };
}
