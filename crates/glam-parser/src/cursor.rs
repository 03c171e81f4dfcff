//! Parse cursor and the ordered-alternative runner.

use crate::env::Environment;
use crate::ParseError;
use glam_ast::ast::Expr;
use std::cell::RefCell;

/// Position in the source. Copies share one [`Environment`], so scope changes
/// made through any copy are visible to all of them.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    rest: &'a str,
    // counted in chars
    offset: usize,
    env: &'a RefCell<Environment>,
}

pub type Outcome<'a> = Result<(Cursor<'a>, Expr), ParseError>;

/// A grammar rule.
pub type Rule = for<'a> fn(Cursor<'a>) -> Outcome<'a>;

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str, env: &'a RefCell<Environment>) -> Self {
        Self { rest: src, offset: 0, env }
    }

    pub fn rest(&self) -> &'a str {
        self.rest
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn env(&self) -> &'a RefCell<Environment> {
        self.env
    }

    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// The `i`-th remaining character, `None` past the end.
    pub fn peek(&self, i: usize) -> Option<char> {
        self.rest.chars().nth(i)
    }

    pub fn advance(self, n: usize) -> Self {
        let mut taken = 0;
        self.take_while(|_| {
            taken += 1;
            taken <= n
        })
        .1
    }

    /// Split off the longest prefix whose characters satisfy `pred`.
    pub fn take_while(self, mut pred: impl FnMut(char) -> bool) -> (&'a str, Self) {
        let mut chars = 0;
        let mut bytes = 0;
        for c in self.rest.chars() {
            if !pred(c) {
                break;
            }
            chars += 1;
            bytes += c.len_utf8();
        }
        let (matched, rest) = self.rest.split_at(bytes);
        (matched, Self { rest, offset: self.offset + chars, env: self.env })
    }

    pub fn skip_while(self, pred: impl FnMut(char) -> bool) -> Self {
        self.take_while(pred).1
    }
}

/// Run `rules` in order from the same position.
///
/// The first success wins. A fatal error stops the search at once; otherwise
/// the error of the last rule tried is returned.
pub fn try_alternatives<'a>(cursor: Cursor<'a>, rules: &[Rule]) -> Outcome<'a> {
    let mut last = Err(ParseError::NotAnExpression { offset: cursor.offset() });
    for rule in rules {
        match rule(cursor) {
            Ok(found) => return Ok(found),
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => last = Err(err),
        }
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam_ast::ast::Variable;

    fn never<'a>(c: Cursor<'a>) -> Outcome<'a> {
        Err(ParseError::ExpectedVariable { offset: c.offset() })
    }

    fn fatal<'a>(c: Cursor<'a>) -> Outcome<'a> {
        Err(ParseError::MissingLambdaBody { offset: c.offset() })
    }

    fn one<'a>(c: Cursor<'a>) -> Outcome<'a> {
        Ok((c.advance(1), Expr::Variable(Variable::free("one"))))
    }

    #[test]
    fn take_while_counts_chars_not_bytes() {
        let env = RefCell::new(Environment::new());
        let c = Cursor::new("λλx y", &env);
        let (taken, next) = c.take_while(|ch| ch != ' ');
        assert_eq!(taken, "λλx");
        assert_eq!(next.offset(), 3);
        assert_eq!(next.rest(), " y");
        assert_eq!(next.peek(1), Some('y'));
        assert_eq!(next.peek(2), None);
    }

    #[test]
    fn advance_stops_at_end() {
        let env = RefCell::new(Environment::new());
        let c = Cursor::new("ab", &env).advance(5);
        assert!(c.is_empty());
        assert_eq!(c.offset(), 2);
    }

    #[test]
    fn first_success_wins() {
        let env = RefCell::new(Environment::new());
        let c = Cursor::new("abc", &env);
        let (next, _) = try_alternatives(c, &[never, one, fatal]).unwrap();
        assert_eq!(next.offset(), 1);
    }

    #[test]
    fn fatal_error_short_circuits() {
        let env = RefCell::new(Environment::new());
        let c = Cursor::new("abc", &env);
        let err = try_alternatives(c, &[never, fatal, one]).unwrap_err();
        assert_eq!(err, ParseError::MissingLambdaBody { offset: 0 });
    }

    #[test]
    fn last_error_is_reported() {
        let env = RefCell::new(Environment::new());
        let c = Cursor::new("abc", &env);
        let err = try_alternatives(c, &[never, never]).unwrap_err();
        assert_eq!(err, ParseError::ExpectedVariable { offset: 0 });
    }
}
