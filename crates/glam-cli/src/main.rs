mod shell;

use clap::Parser;
use shell::{render, CliError, Output, Shell, ShellOptions};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "glam", version, about = "Untyped lambda calculus normalizer")]
struct Opt {
    /// Script to run line by line; starts the interactive shell when omitted
    script: Option<PathBuf>,

    /// One-line program
    #[arg(short = 'e', long = "eval", conflicts_with = "script")]
    eval: Option<String>,

    /// Print the parsed tree with binder ids instead of reducing
    #[arg(long = "dump-ast", default_value_t = false)]
    dump_ast: bool,

    /// Print the parsed tree as JSON instead of reducing
    #[arg(long = "dump-ast-json", default_value_t = false, conflicts_with = "dump_ast")]
    dump_ast_json: bool,

    /// Shell prompt
    #[arg(long = "prompt", default_value = "glam) ")]
    prompt: String,
}

impl Opt {
    fn output(&self) -> Output {
        if self.dump_ast_json {
            Output::AstJson
        } else if self.dump_ast {
            Output::Ast
        } else {
            Output::Normal
        }
    }
}

// Logs go to stderr so they never mix with results. Filter with GLAM_LOG,
// e.g. GLAM_LOG=glam_runtime=trace.
fn init_logging() {
    let filter = EnvFilter::try_from_env("GLAM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(opt: Opt) -> Result<(), CliError> {
    let output = opt.output();
    if let Some(code) = opt.eval {
        println!("{}", render(&code, output)?);
        return Ok(());
    }
    let opts = ShellOptions { prompt: opt.prompt, output };
    let mut shell = Shell::new(opts, io::stdout().lock());
    match opt.script {
        Some(path) => shell.run_file(&path),
        None => shell.repl(io::stdin().lock()),
    }
}

fn main() {
    init_logging();
    let opt = Opt::parse();
    if let Err(err) = run(opt) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
