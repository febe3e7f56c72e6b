//! Error types and error handling for the lexer and its debug tool.
//!
//! Tokenizing never fails in permissive mode, so the error type mostly
//! serves:
//!
//! - Strict lexing, which rejects unterminated constructs
//! - The debug CLI (missing files, unknown blocks, bad arguments)
//! - Error formatting and helpful suggestions

pub mod errors;
