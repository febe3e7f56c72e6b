use std::{
    env,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use tracing::{info, Level};
use tracing_subscriber::EnvFilter;
use verse_lexer::{
    display_error,
    docs::{
        blocks::{extract_code_blocks, find_markdown_file, read_markdown_file, select_blocks},
        cli::{
            output_error, parse_args, report_block, report_summary, Command, RunOptions, HELP,
        },
    },
    errors::errors::Error,
};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(Level::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let command = match parse_args(env::args().skip(1)) {
        Ok(command) => command,
        Err(error) => {
            display_error(&error, Path::new("<args>"), None);
            println!("{}", HELP);
            return ExitCode::FAILURE;
        }
    };

    let options = match command {
        Command::Help => {
            println!("{}", HELP);
            return ExitCode::SUCCESS;
        }
        Command::Run(options) => options,
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            display_error(&error, Path::new(&options.file), None);
            ExitCode::FAILURE
        }
    }
}

fn run(options: &RunOptions) -> Result<(), Error> {
    let crate_root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from));

    let path = find_markdown_file(&options.file, crate_root, exe_dir.as_deref())?;
    let content = read_markdown_file(&path)?;

    let blocks = extract_code_blocks(&content);
    let selected = select_blocks(&blocks, &options.block, &options.file)?;

    info!(file = %path.display(), blocks = selected.len(), "lexing code blocks");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for block in &selected {
        let unterminated = report_block(&mut out, block).map_err(output_error)?;

        if let (true, Some(error)) = (options.strict, unterminated) {
            out.flush().map_err(output_error)?;
            display_error(
                &error,
                &PathBuf::from(format!("{}#{}", options.file, block.id)),
                Some(block.code.as_str()),
            );
        }
    }

    report_summary(&mut out, selected.len()).map_err(output_error)?;
    out.flush().map_err(output_error)
}
