//! Grammar rules.
//!
//! ```text
//! Application := ws? Atom (ws? Atom)* ws?
//! Atom        := Variable | Lambda | Ordering
//! Variable    := identifier-char+
//! Lambda      := ('>' | 'λ') LambdaTail
//! LambdaTail  := ws? Variable ('.' Application | ws LambdaTail)
//! Ordering    := '(' Application ')'
//! ```

use crate::cursor::{try_alternatives, Cursor, Outcome, Rule};
use crate::env;
use crate::ParseError;
use glam_ast::ast::{Expr, Variable};

const ATOMS: &[Rule] = &[variable, lambda, ordering];

pub fn is_reserved(c: char) -> bool {
    matches!(c, '>' | '.' | '(' | ')' | 'λ')
}

pub fn is_var_char(c: char) -> bool {
    !is_reserved(c) && !c.is_whitespace()
}

fn is_lambda_marker(c: char) -> bool {
    c == '>' || c == 'λ'
}

pub fn variable<'a>(cursor: Cursor<'a>) -> Outcome<'a> {
    if !cursor.peek(0).is_some_and(is_var_char) {
        return Err(ParseError::ExpectedVariable { offset: cursor.offset() });
    }
    let (name, next) = cursor.take_while(is_var_char);
    let id = cursor.env().borrow().resolve(name);
    Ok((next, Expr::Variable(Variable::new(name, id))))
}

pub fn lambda<'a>(cursor: Cursor<'a>) -> Outcome<'a> {
    match cursor.peek(0) {
        Some(c) if is_lambda_marker(c) => lambda_tail(cursor.advance(1)),
        _ => Err(ParseError::ExpectedLambda { offset: cursor.offset() }),
    }
}

// One parameter and whatever follows it. `>x y.e` recurses here once per
// parameter, so the binding for `x` stays open while `y` and `e` are parsed.
fn lambda_tail<'a>(cursor: Cursor<'a>) -> Outcome<'a> {
    let cursor = cursor.skip_while(char::is_whitespace);
    if !cursor.peek(0).is_some_and(is_var_char) {
        return Err(ParseError::ExpectedVariable { offset: cursor.offset() });
    }
    let (name, cursor) = cursor.take_while(is_var_char);
    let scope = env::bind(cursor.env(), name);
    let (next, body) = match cursor.peek(0) {
        Some('.') => application(cursor.advance(1))?,
        Some(c) if c.is_whitespace() => {
            let cursor = cursor.skip_while(char::is_whitespace);
            if cursor.is_empty() {
                return Err(ParseError::MissingLambdaBody { offset: cursor.offset() });
            }
            lambda_tail(cursor)?
        }
        _ => return Err(ParseError::MissingLambdaBody { offset: cursor.offset() }),
    };
    Ok((next, Expr::lambda(scope.param().clone(), body)))
}

pub fn application<'a>(cursor: Cursor<'a>) -> Outcome<'a> {
    let mut cursor = cursor.skip_while(char::is_whitespace);
    let mut parts = Vec::new();
    while !cursor.is_empty() {
        match try_alternatives(cursor, ATOMS) {
            Ok((next, expr)) => {
                parts.push(expr);
                cursor = next;
            }
            Err(err) if err.is_fatal() => return Err(err),
            Err(_) => break,
        }
        cursor = cursor.skip_while(char::is_whitespace);
    }
    if parts.len() > 1 {
        return Ok((cursor, Expr::Application(parts)));
    }
    match parts.pop() {
        Some(only) => Ok((cursor, only)),
        None => Err(ParseError::NotAnExpression { offset: cursor.offset() }),
    }
}

pub fn ordering<'a>(cursor: Cursor<'a>) -> Outcome<'a> {
    if cursor.peek(0) != Some('(') {
        return Err(ParseError::ExpectedOrdering { offset: cursor.offset() });
    }
    let (next, expr) = application(cursor.advance(1))?;
    match next.peek(0) {
        Some(')') => Ok((next.advance(1), expr)),
        _ => Err(ParseError::MissingCloseParen { offset: next.offset() }),
    }
}
