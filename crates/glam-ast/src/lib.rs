pub mod ast {
    use serde::{Deserialize, Serialize};
    use std::fmt;

    /// Identifies which lambda binder a variable occurrence refers to.
    ///
    /// Ids are only meaningful together with the variable name: the outermost
    /// active binder of every name gets `0`, shadowing binders get `1, 2, ...`
    /// and free variables carry [`BinderId::FREE`].
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
    #[serde(transparent)]
    pub struct BinderId(pub i64);

    impl BinderId {
        pub const FREE: BinderId = BinderId(-1);

        pub fn is_free(self) -> bool {
            self.0 < 0
        }
    }

    impl fmt::Display for BinderId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
    pub struct Variable {
        pub name: String,
        pub id: BinderId,
    }
    impl Variable {
        pub fn new(name: impl Into<String>, id: BinderId) -> Self {
            Self { name: name.into(), id }
        }

        pub fn free(name: impl Into<String>) -> Self {
            Self::new(name, BinderId::FREE)
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub enum Expr {
        Variable(Variable),
        Lambda {
            param: Variable,
            body: Box<Expr>,
        },
        // Always two or more parts when produced by the parser; a single atom
        // is never wrapped.
        Application(Vec<Expr>),
    }

    impl Expr {
        pub fn var(name: impl Into<String>, id: i64) -> Self {
            Expr::Variable(Variable::new(name, BinderId(id)))
        }

        pub fn lambda(param: Variable, body: Expr) -> Self {
            Expr::Lambda { param, body: Box::new(body) }
        }
    }

    impl fmt::Display for Expr {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&crate::pretty::print_expr(self))
        }
    }
}

pub mod pretty {
    use crate::ast::*;

    /// Lambda marker used when rendering; the parser also accepts `λ`.
    pub const LAMBDA: char = '>';

    fn print_var(v: &Variable, ids: bool) -> String {
        if ids {
            format!("{}#{}", v.name, v.id)
        } else {
            v.name.clone()
        }
    }

    // Everything after the lambda marker. Directly nested lambdas collapse into
    // the multi-parameter shorthand `x y.body`.
    fn print_lambda_tail(param: &Variable, body: &Expr, ids: bool) -> String {
        match body {
            Expr::Lambda { param: inner, body: inner_body } => format!(
                "{} {}",
                print_var(param, ids),
                print_lambda_tail(inner, inner_body, ids)
            ),
            _ => format!("{}.{}", print_var(param, ids), print(body, ids)),
        }
    }

    fn print(e: &Expr, ids: bool) -> String {
        match e {
            Expr::Variable(v) => print_var(v, ids),
            Expr::Lambda { param, body } => {
                format!("{}{}", LAMBDA, print_lambda_tail(param, body, ids))
            }
            // Application is left-nested, so only a head application can go
            // without parentheses.
            Expr::Application(parts) => parts
                .iter()
                .enumerate()
                .map(|(i, p)| match p {
                    Expr::Lambda { .. } => format!("({})", print(p, ids)),
                    Expr::Application(_) if i > 0 => format!("({})", print(p, ids)),
                    _ => print(p, ids),
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Render an expression in the surface syntax. Binder ids are not shown, so
    /// shadowed binders of the same name print identically.
    pub fn print_expr(e: &Expr) -> String {
        print(e, false)
    }

    /// Same layout as [`print_expr`] with every variable suffixed by `#id`.
    pub fn print_expr_with_ids(e: &Expr) -> String {
        print(e, true)
    }
}
