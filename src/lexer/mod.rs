//! Lexical analysis for Verse source.
//!
//! This module contains the highlighting lexer. It handles:
//!
//! - The ordered, per-state rule table
//! - The state-stack driver that applies it
//! - Nested comments, string interpolation and `using` blocks
//! - The language detection heuristic
//! - The descriptor hosts use to select the lexer

pub mod analyse;
pub mod info;
pub mod lexer;
pub mod rules;
pub mod tokens;
