//! Interactive shell and script runner.

use glam_ast::pretty::{print_expr, print_expr_with_ids};
use glam_parser::parse;
use glam_runtime::{beta_normal, evaluate};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const HELP: &[&str] = &[
    "\\q, \\quit, \\exit -> Exit the shell",
    "\\exec [script] -> Execute a script file",
    "\\help -> List shell commands",
];

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// Already rendered with the source line and a caret.
    #[error("{0}")]
    Parse(String),

    #[error("Could not load file '{}'", .path.display())]
    Load { path: PathBuf, source: io::Error },
}

/// What to print for each evaluated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    /// Beta-normal form.
    #[default]
    Normal,
    /// Parsed tree with binder ids, not reduced.
    Ast,
    /// Parsed tree as JSON, not reduced.
    AstJson,
}

#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub prompt: String,
    pub output: Output,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self { prompt: "glam) ".into(), output: Output::Normal }
    }
}

/// Render one line according to `output`; parse failures become
/// [`CliError::Parse`].
pub fn render(line: &str, output: Output) -> Result<String, CliError> {
    let expr = parse(line).map_err(|err| CliError::Parse(err.with_source(line)))?;
    Ok(match output {
        Output::Normal => print_expr(&beta_normal(expr)),
        Output::Ast => print_expr_with_ids(&expr),
        Output::AstJson => serde_json::to_string_pretty(&expr)?,
    })
}

enum Flow {
    Continue,
    Quit,
}

pub struct Shell<W: Write> {
    opts: ShellOptions,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(opts: ShellOptions, out: W) -> Self {
        Self { opts, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Evaluate one line and print the result. Parse errors are printed, not
    /// returned.
    pub fn eval_line(&mut self, line: &str) -> Result<(), CliError> {
        let text = match self.opts.output {
            Output::Normal => evaluate(line),
            output => match render(line, output) {
                Ok(text) => text,
                Err(CliError::Parse(text)) => text,
                Err(err) => return Err(err),
            },
        };
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// Run every non-blank line of a script, echoing each after the prompt.
    pub fn run_file(&mut self, path: &Path) -> Result<(), CliError> {
        let src = fs::read_to_string(path)
            .map_err(|source| CliError::Load { path: path.to_path_buf(), source })?;
        debug!(path = %path.display(), "run script");
        for line in src.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                continue;
            }
            writeln!(self.out, "{}{}", self.opts.prompt, line)?;
            self.eval_line(line)?;
        }
        Ok(())
    }

    /// Read-eval-print loop until `\quit` or end of input.
    pub fn repl<R: BufRead>(&mut self, input: R) -> Result<(), CliError> {
        let mut lines = input.lines();
        loop {
            write!(self.out, "{}", self.opts.prompt)?;
            self.out.flush()?;
            let Some(line) = lines.next() else {
                writeln!(self.out)?;
                return Ok(());
            };
            let line = line?;
            if let Flow::Quit = self.dispatch(&line)? {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, line: &str) -> Result<Flow, CliError> {
        let Some(command) = line.strip_prefix('\\') else {
            if !line.trim().is_empty() {
                self.eval_line(line)?;
            }
            return Ok(Flow::Continue);
        };
        let mut words = command.split(' ');
        match words.next().unwrap_or_default() {
            "q" | "quit" | "exit" => return Ok(Flow::Quit),
            "exec" => match words.next() {
                None => writeln!(self.out, "'exec' requires a file path as an argument")?,
                Some(path) => match self.run_file(Path::new(path)) {
                    Err(err @ CliError::Load { .. }) => {
                        warn!(%err, "exec failed");
                        writeln!(self.out, "{err}")?;
                    }
                    other => other?,
                },
            },
            "h" | "help" => {
                for line in HELP {
                    writeln!(self.out, "{line}")?;
                }
            }
            _ => writeln!(self.out, "Unrecognized command '{line}'")?,
        }
        Ok(Flow::Continue)
    }
}
