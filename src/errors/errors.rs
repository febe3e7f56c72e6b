use std::{fmt::Display, path::PathBuf};

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    /// For errors that do not point into source text.
    pub fn without_position(error_impl: ErrorImpl) -> Self {
        Error::new(error_impl, Position::null())
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedState { .. } => "UnterminatedState",
            ErrorImpl::FileNotFound { .. } => "FileNotFound",
            ErrorImpl::FileRead { .. } => "FileRead",
            ErrorImpl::NoCodeBlocks { .. } => "NoCodeBlocks",
            ErrorImpl::BlockNotFound { .. } => "BlockNotFound",
            ErrorImpl::UnknownOption { .. } => "UnknownOption",
            ErrorImpl::MissingArgument { .. } => "MissingArgument",
            ErrorImpl::OutputWrite { .. } => "OutputWrite",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedState { state, depth } => ErrorTip::Suggestion(format!(
                "Input ends inside `{}` ({} open), is a closing delimiter missing?",
                state, depth
            )),
            ErrorImpl::FileNotFound { file, searched } => ErrorTip::Suggestion(format!(
                "Markdown file not found: {}\nSearched in:\n  {}",
                file,
                searched
                    .iter()
                    .map(|path| path.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("\n  ")
            )),
            ErrorImpl::FileRead { path, message } => ErrorTip::Suggestion(format!(
                "Could not read {}: {}",
                path.to_string_lossy(),
                message
            )),
            ErrorImpl::NoCodeBlocks { file } => {
                ErrorTip::Suggestion(format!("No code blocks found in {}", file))
            }
            ErrorImpl::BlockNotFound {
                block,
                file,
                available,
            } => ErrorTip::Suggestion(format!(
                "Block '{}' not found in {}\nAvailable blocks: {}",
                block,
                file,
                available.join(", ")
            )),
            ErrorImpl::UnknownOption { option } => {
                ErrorTip::Suggestion(format!("Unknown option '{}'", option))
            }
            ErrorImpl::MissingArgument { option } => {
                ErrorTip::Suggestion(format!("{} requires an argument", option))
            }
            ErrorImpl::OutputWrite { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("input ends inside {state:?} at depth {depth}")]
    UnterminatedState { state: String, depth: usize },
    #[error("markdown file not found: {file:?}")]
    FileNotFound { file: String, searched: Vec<PathBuf> },
    #[error("could not read {path:?}: {message}")]
    FileRead { path: PathBuf, message: String },
    #[error("no code blocks found in {file:?}")]
    NoCodeBlocks { file: String },
    #[error("block {block:?} not found in {file:?}")]
    BlockNotFound {
        block: String,
        file: String,
        available: Vec<String>,
    },
    #[error("unknown option {option:?}")]
    UnknownOption { option: String },
    #[error("{option} requires an argument")]
    MissingArgument { option: String },
    #[error("could not write report: {message}")]
    OutputWrite { message: String },
}
