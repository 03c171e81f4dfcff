//! Parser for lambda expressions with binder resolution.
//!
//! `>` or `λ` introduces a lambda, `.` separates parameters from the body and
//! juxtaposition is application. Every variable is tagged with the id of the
//! binder it refers to while parsing, so shadowed names never need renaming.

pub mod cursor;
pub mod env;
pub mod grammar;

use cursor::Cursor;
use env::Environment;
use glam_ast::ast::Expr;
use std::cell::RefCell;
use tracing::debug;

/// Offsets count characters from the start of the source.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Expected a Variable expression but none was found")]
    ExpectedVariable { offset: usize },
    #[error("Expected a Lambda expression but none was found")]
    ExpectedLambda { offset: usize },
    #[error("Expected an ordering expression but none was found")]
    ExpectedOrdering { offset: usize },
    #[error("Expected a lambda body")]
    MissingLambdaBody { offset: usize },
    #[error("Missing closing ')'")]
    MissingCloseParen { offset: usize },
    #[error("Not the beginning of an expression")]
    NotAnExpression { offset: usize },
    #[error("Invalid character")]
    InvalidCharacter { offset: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::ExpectedVariable { offset }
            | ParseError::ExpectedLambda { offset }
            | ParseError::ExpectedOrdering { offset }
            | ParseError::MissingLambdaBody { offset }
            | ParseError::MissingCloseParen { offset }
            | ParseError::NotAnExpression { offset }
            | ParseError::InvalidCharacter { offset } => *offset,
        }
    }

    /// Fatal errors come from a construct whose opening token was already
    /// consumed; they end the whole alternation instead of letting the next
    /// rule try.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ParseError::MissingLambdaBody { .. } | ParseError::MissingCloseParen { .. }
        )
    }

    /// The source line followed by a caret under the error position.
    pub fn with_source(&self, src: &str) -> String {
        format!("{}\n{}^ {}", src, " ".repeat(self.offset()), self)
    }
}

pub fn parse(src: &str) -> Result<Expr, ParseError> {
    let env = RefCell::new(Environment::new());
    parse_with_env(src, &env)
}

/// Parse against a caller-owned environment. Names already bound in `env`
/// resolve to their open binders instead of being free.
pub fn parse_with_env(src: &str, env: &RefCell<Environment>) -> Result<Expr, ParseError> {
    debug!(src, "parse");
    let (rest, expr) = grammar::application(Cursor::new(src, env))?;
    if !rest.is_empty() {
        return Err(ParseError::InvalidCharacter { offset: rest.offset() });
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam_ast::ast::{BinderId, Variable};
    use pretty_assertions::assert_eq;

    fn v(name: &str, id: i64) -> Expr {
        Expr::var(name, id)
    }

    fn lam(name: &str, id: i64, body: Expr) -> Expr {
        Expr::lambda(Variable::new(name, BinderId(id)), body)
    }

    #[test]
    fn single_variable_is_free() {
        assert_eq!(parse("x").unwrap(), v("x", -1));
    }

    #[test]
    fn identifiers_take_any_non_reserved_chars() {
        assert_eq!(parse("  foo'_1+  ").unwrap(), v("foo'_1+", -1));
    }

    #[test]
    fn single_atom_is_not_wrapped() {
        assert_eq!(parse("((x))").unwrap(), v("x", -1));
    }

    #[test]
    fn application_keeps_order() {
        assert_eq!(
            parse("f a b").unwrap(),
            Expr::Application(vec![v("f", -1), v("a", -1), v("b", -1)])
        );
    }

    #[test]
    fn atoms_need_no_separating_space() {
        assert_eq!(
            parse("f(a)(b)").unwrap(),
            Expr::Application(vec![v("f", -1), v("a", -1), v("b", -1)])
        );
    }

    #[test]
    fn nested_ordering_stays_nested() {
        assert_eq!(
            parse("a (b c)").unwrap(),
            Expr::Application(vec![
                v("a", -1),
                Expr::Application(vec![v("b", -1), v("c", -1)])
            ])
        );
    }

    #[test]
    fn lambda_binds_its_parameter() {
        assert_eq!(parse(">x.x y").unwrap(), lam("x", 0, Expr::Application(vec![v("x", 0), v("y", -1)])));
    }

    #[test]
    fn lambda_glyph_is_accepted() {
        assert_eq!(parse("λx.x").unwrap(), parse(">x.x").unwrap());
    }

    #[test]
    fn shadowing_gets_a_fresh_id() {
        assert_eq!(parse(">x.>x.x").unwrap(), lam("x", 0, lam("x", 1, v("x", 1))));
    }

    #[test]
    fn outer_binder_is_visible_after_shadowing_ends() {
        assert_eq!(
            parse(">x.(>x.x) x").unwrap(),
            lam("x", 0, Expr::Application(vec![lam("x", 1, v("x", 1)), v("x", 0)]))
        );
    }

    #[test]
    fn binding_ends_with_its_lambda() {
        assert_eq!(
            parse("(>x.x) x").unwrap(),
            Expr::Application(vec![lam("x", 0, v("x", 0)), v("x", -1)])
        );
    }

    #[test]
    fn shorthand_parameters_nest() {
        assert_eq!(parse(">x y.x").unwrap(), parse(">x.>y.x").unwrap());
        assert_eq!(parse("> x  y.x").unwrap(), parse(">x.>y.x").unwrap());
        assert!(parse(">x y .x").is_err());
    }

    #[test]
    fn shorthand_with_repeated_name_shadows() {
        assert_eq!(parse(">x x.x").unwrap(), lam("x", 0, lam("x", 1, v("x", 1))));
    }

    #[test]
    fn lambda_body_extends_to_the_right() {
        assert_eq!(
            parse(">x.a >y.y").unwrap(),
            lam("x", 0, Expr::Application(vec![v("a", -1), lam("y", 0, v("y", 0))]))
        );
    }

    #[test]
    fn unmatched_paren_is_fatal() {
        let err = parse("(x").unwrap_err();
        assert_eq!(err, ParseError::MissingCloseParen { offset: 2 });
        assert!(err.is_fatal());
    }

    #[test]
    fn unmatched_paren_inside_application() {
        assert_eq!(parse("a (b c").unwrap_err(), ParseError::MissingCloseParen { offset: 6 });
    }

    #[test]
    fn leading_close_paren_is_not_an_expression() {
        assert_eq!(parse(")").unwrap_err(), ParseError::NotAnExpression { offset: 0 });
    }

    #[test]
    fn empty_source_is_not_an_expression() {
        assert_eq!(parse("").unwrap_err(), ParseError::NotAnExpression { offset: 0 });
        assert_eq!(parse("   ").unwrap_err(), ParseError::NotAnExpression { offset: 3 });
    }

    #[test]
    fn trailing_input_is_an_invalid_character() {
        assert_eq!(parse("x )").unwrap_err(), ParseError::InvalidCharacter { offset: 2 });
        assert_eq!(parse("a.b").unwrap_err(), ParseError::InvalidCharacter { offset: 1 });
    }

    #[test]
    fn parameter_without_body_is_fatal() {
        assert_eq!(parse(">x").unwrap_err(), ParseError::MissingLambdaBody { offset: 2 });
        assert_eq!(parse("(>x)").unwrap_err(), ParseError::MissingLambdaBody { offset: 3 });
    }

    #[test]
    fn trailing_whitespace_after_parameter_is_fatal() {
        for (src, offset) in [(">x ", 3), (">x y ", 5), ("a >x ", 5), ("λx \t ", 5)] {
            let err = parse(src).unwrap_err();
            assert_eq!(err, ParseError::MissingLambdaBody { offset }, "source {src:?}");
            assert!(err.is_fatal());
        }
    }

    #[test]
    fn offsets_count_characters() {
        assert_eq!(parse("λx").unwrap_err(), ParseError::MissingLambdaBody { offset: 2 });
    }

    #[test]
    fn error_rendering_points_at_offset() {
        let err = parse("(x").unwrap_err();
        assert_eq!(err.with_source("(x"), "(x\n  ^ Missing closing ')'");
    }
}
