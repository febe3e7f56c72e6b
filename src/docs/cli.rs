use std::io::{self, Write};

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::Lexer,
};

use super::blocks::CodeBlock;

pub const DEFAULT_FILE: &str = "VerseSyntaxValidation.md";
pub const MAX_TOKENS: usize = 30;
const RULE_WIDTH: usize = 70;

pub const HELP: &str = "
Usage: verse_lexer [OPTIONS]

OPTIONS:
  all                          Test all code blocks (default)
  <number>                     Test specific block (e.g., \"01\", \"16\", \"21b\")
  -f, --file <path>            Use specific markdown file (default: VerseSyntaxValidation.md)
  -s, --strict                 Report constructs left open at the end of a block
  -h, --help                   Show this help message

EXAMPLES:
  verse_lexer all                  # Test all blocks in VerseSyntaxValidation.md
  verse_lexer 24a                  # Test block 24a
  verse_lexer -f other.md          # Test all blocks in other.md
  verse_lexer 08 -f custom.md      # Test block 08 in custom.md

Set RUST_LOG=verse_lexer=trace to follow state pushes and pops.
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Run(RunOptions),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub block: String,
    pub file: String,
    pub strict: bool,
}

/// Parses the arguments after the program name. No arguments at all
/// means help.
pub fn parse_args<I, S>(args: I) -> Result<Command, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut args = args.into_iter().peekable();

    if args.peek().is_none() {
        return Ok(Command::Help);
    }

    let mut block = None;
    let mut file = String::from(DEFAULT_FILE);
    let mut strict = false;

    while let Some(arg) = args.next() {
        let arg = arg.as_ref();

        match arg {
            "-h" | "--help" => return Ok(Command::Help),
            "-s" | "--strict" => strict = true,
            "-f" | "--file" => match args.next() {
                Some(path) => file = path.as_ref().to_string(),
                None => {
                    return Err(Error::without_position(ErrorImpl::MissingArgument {
                        option: arg.to_string(),
                    }))
                }
            },
            _ if arg.starts_with('-') => {
                return Err(Error::without_position(ErrorImpl::UnknownOption {
                    option: arg.to_string(),
                }))
            }
            _ => block = Some(arg.to_string()),
        }
    }

    Ok(Command::Run(RunOptions {
        block: block.unwrap_or_else(|| String::from("all")),
        file,
        strict,
    }))
}

fn truncate(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => (&text[..index], true),
        None => (text, false),
    }
}

/// Writes the token listing for one block and returns the lex result's
/// strict-mode error, if any.
pub fn report_block(out: &mut impl Write, block: &CodeBlock) -> io::Result<Option<Error>> {
    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "CODE BLOCK #{}", block.id)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    let (preview, truncated) = truncate(&block.code, 200);
    writeln!(out, "{}{}", preview, if truncated { "..." } else { "" })?;

    writeln!(out, "\n{}", "-".repeat(RULE_WIDTH))?;
    writeln!(out, "TOKEN ANALYSIS (first {} tokens):", MAX_TOKENS)?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    let lexed = Lexer::new(&block.code).run();

    for token in lexed.tokens.iter().take(MAX_TOKENS) {
        if token.is_whitespace() {
            continue;
        }

        let (value, _) = truncate(&token.value, 50);
        writeln!(out, "{:35} | {:?}", token.kind.to_string(), value)?;
    }

    if lexed.tokens.len() > MAX_TOKENS {
        writeln!(out, "\n... and {} more tokens", lexed.tokens.len() - MAX_TOKENS)?;
    }

    Ok(lexed.unterminated_error())
}

/// Wraps a failed write to the report output.
pub fn output_error(err: io::Error) -> Error {
    Error::without_position(ErrorImpl::OutputWrite {
        message: err.to_string(),
    })
}

pub fn report_summary(out: &mut impl Write, tested: usize) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Tested {} block(s)", tested)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}
