//! Normalization of parsed lambda expressions.

pub mod reduce;

pub use reduce::{apply, beta_normal};

use glam_ast::pretty::print_expr;
use glam_parser::parse;
use tracing::debug;

/// Parse one line, reduce it to normal form and render the result.
///
/// A line that does not parse is echoed back with a caret under the error
/// position and the error message.
pub fn evaluate(line: &str) -> String {
    match parse(line) {
        Ok(expr) => {
            debug!(line, "reduce");
            print_expr(&beta_normal(expr))
        }
        Err(err) => err.with_source(line),
    }
}
