use std::{
    fs,
    path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::errors::errors::{Error, ErrorImpl};

lazy_static! {
    // <!-- 21b --> followed by a ```verse fence
    static ref CODE_BLOCK: Regex =
        Regex::new(r"(?s)<!--\s*(\d+\w?)\s*-->\s*```verse\n(.*?)```").unwrap();
}

/// A fenced Verse code block tagged with an id comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub id: String,
    pub code: String,
}

/// Locations tried for `file`, in order.
pub fn search_paths(file: &str, crate_root: &Path, exe_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from(file),
        crate_root.join("docs").join(file),
        crate_root.join(file),
    ];

    if let Some(exe_dir) = exe_dir {
        paths.push(exe_dir.join(file));
    }

    paths
}

pub fn find_markdown_file(
    file: &str,
    crate_root: &Path,
    exe_dir: Option<&Path>,
) -> Result<PathBuf, Error> {
    let searched = search_paths(file, crate_root, exe_dir);

    match searched.iter().find(|path| path.is_file()) {
        Some(path) => {
            debug!(path = %path.display(), "found markdown file");
            Ok(path.clone())
        }
        None => Err(Error::without_position(ErrorImpl::FileNotFound {
            file: file.to_string(),
            searched,
        })),
    }
}

pub fn read_markdown_file(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|err| {
        Error::without_position(ErrorImpl::FileRead {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    })
}

pub fn extract_code_blocks(content: &str) -> Vec<CodeBlock> {
    CODE_BLOCK
        .captures_iter(content)
        .map(|captures| CodeBlock {
            id: captures[1].to_string(),
            code: captures[2].to_string(),
        })
        .collect()
}

/// Picks the blocks to lex: all of them for `"all"`, otherwise those
/// whose id equals `block` ignoring case.
pub fn select_blocks<'a>(
    blocks: &'a [CodeBlock],
    block: &str,
    file: &str,
) -> Result<Vec<&'a CodeBlock>, Error> {
    if blocks.is_empty() {
        return Err(Error::without_position(ErrorImpl::NoCodeBlocks {
            file: file.to_string(),
        }));
    }

    if block.eq_ignore_ascii_case("all") {
        return Ok(blocks.iter().collect());
    }

    let selected: Vec<&CodeBlock> = blocks
        .iter()
        .filter(|candidate| candidate.id.eq_ignore_ascii_case(block))
        .collect();

    if selected.is_empty() {
        return Err(Error::without_position(ErrorImpl::BlockNotFound {
            block: block.to_string(),
            file: file.to_string(),
            available: blocks.iter().map(|candidate| candidate.id.clone()).collect(),
        }));
    }

    Ok(selected)
}
