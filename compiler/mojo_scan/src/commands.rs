//! Argument parsing and output rendering for the CLI commands.

use std::fmt::Write as _;

use mojo_scanner::{Checkpoint, Driver, Lexeme, Span, Tokenized};
use serde::Serialize;

use crate::CliError;

pub const USAGE: &str = "\
Usage: mojo-scan <command> [options]

Commands:
  tokens <file>   Print the host token stream, one lexeme per line
  state <file>    Print every checkpoint offset with its state snapshot
  help            Print this message

Options for tokens:
  --json              Emit JSON lines instead of text
  --resume=<offset>   Resume from the checkpoint recorded at <offset>

Set MOJO_SCAN_LOG (or RUST_LOG) to a filter such as `mojo_scanner=trace`
to trace scanner decisions on stderr.
";

/// Options of `mojo-scan tokens`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokensArgs {
    pub path: String,
    pub json: bool,
    pub resume: Option<u32>,
}

/// A parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Tokens(TokensArgs),
    State { path: String },
    Help,
}

/// Parse the arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let Some((command, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "help" | "--help" | "-h" => Ok(Command::Help),
        "tokens" => {
            let mut path = None;
            let mut json = false;
            let mut resume = None;
            for arg in rest {
                if arg == "--json" {
                    json = true;
                } else if let Some(offset) = arg.strip_prefix("--resume=") {
                    let offset = offset
                        .parse::<u32>()
                        .map_err(|_| CliError::InvalidOffset(offset.to_string()))?;
                    resume = Some(offset);
                } else if arg.starts_with('-') {
                    return Err(CliError::UnknownOption(arg.clone()));
                } else if path.is_none() {
                    path = Some(arg.clone());
                } else {
                    return Err(CliError::UnexpectedArgument(arg.clone()));
                }
            }
            let path = path.ok_or(CliError::MissingPath)?;
            Ok(Command::Tokens(TokensArgs { path, json, resume }))
        }
        "state" => match rest {
            [] => Err(CliError::MissingPath),
            [path] if !path.starts_with('-') => Ok(Command::State { path: path.clone() }),
            [path] => Err(CliError::UnknownOption(path.clone())),
            [_, extra, ..] => Err(CliError::UnexpectedArgument(extra.clone())),
        },
        other => Err(CliError::UnknownCommand(other.to_string())),
    }
}

/// Read a source file.
pub fn read_source(path: &str) -> Result<String, CliError> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })?;
    tracing::debug!(path, bytes = source.len(), "read source");
    Ok(source)
}

#[derive(Serialize)]
struct JsonLexeme<'s> {
    kind: &'static str,
    span: Span,
    text: &'s str,
}

/// Render the token stream of `source`.
///
/// With `resume`, the file is tokenized once to collect checkpoints, and the
/// output is the stream produced by resuming from the first checkpoint at that
/// offset.
pub fn render_tokens(source: &str, json: bool, resume: Option<u32>) -> Result<String, CliError> {
    let out = match resume {
        None => Driver::new(source).tokenize(),
        Some(offset) => {
            let full = Driver::new(source).tokenize();
            let checkpoint = checkpoint_at(&full, offset)?;
            Driver::resume(source, checkpoint)?.tokenize()
        }
    };

    let mut rendered = String::new();
    for lexeme in &out.lexemes {
        if json {
            rendered.push_str(&serde_json::to_string(&json_lexeme(source, lexeme))?);
            rendered.push('\n');
        } else {
            let _ = writeln!(
                rendered,
                "{} @ {} {:?}",
                lexeme.kind.name(),
                lexeme.span,
                lexeme.text(source)
            );
        }
    }
    Ok(rendered)
}

fn json_lexeme<'s>(source: &'s str, lexeme: &Lexeme) -> JsonLexeme<'s> {
    JsonLexeme {
        kind: lexeme.kind.name(),
        span: lexeme.span,
        text: lexeme.text(source),
    }
}

fn checkpoint_at(out: &Tokenized, offset: u32) -> Result<&Checkpoint, CliError> {
    out.checkpoints
        .iter()
        .find(|checkpoint| checkpoint.offset == offset)
        .ok_or(CliError::NoCheckpointAt(offset))
}

/// Render every checkpoint as `offset: hex bytes`, then the final depth.
pub fn render_state(source: &str) -> String {
    let out = Driver::new(source).tokenize();
    let mut rendered = String::new();
    for checkpoint in &out.checkpoints {
        let _ = write!(rendered, "{}:", checkpoint.offset);
        for byte in &checkpoint.state {
            let _ = write!(rendered, " {byte:02x}");
        }
        rendered.push('\n');
    }
    let _ = writeln!(rendered, "final depth: {}", out.indents.depth());
    rendered
}
