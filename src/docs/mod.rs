//! Support for the debug tool that lexes Verse code blocks embedded in
//! markdown documentation.
//!
//! - `blocks`: locating the document and extracting tagged code blocks
//! - `cli`: argument parsing and the token listing report

pub mod blocks;
pub mod cli;
