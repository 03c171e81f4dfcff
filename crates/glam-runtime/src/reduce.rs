//! Substitution and beta reduction.

use glam_ast::ast::{Expr, Variable};
use tracing::trace;

/// Replace every occurrence of `param` (same name and binder id) inside `expr`
/// with `arg`.
///
/// Lambdas are entered unconditionally: a shadowing binder of the same name
/// has a different id, so its occurrences never match. Free variables of
/// `arg` are not renamed.
pub fn apply(expr: &Expr, param: &Variable, arg: &Expr) -> Expr {
    match expr {
        Expr::Variable(v) if v == param => arg.clone(),
        Expr::Variable(_) => expr.clone(),
        Expr::Lambda { param: own, body } => Expr::Lambda {
            param: own.clone(),
            body: Box::new(apply(body, param, arg)),
        },
        Expr::Application(parts) => {
            Expr::Application(parts.iter().map(|p| apply(p, param, arg)).collect())
        }
    }
}

/// Reduce `expr` to beta-normal form.
///
/// Parts of an application are normalized first, then the head is applied to
/// its arguments for as long as it is a lambda. Terms without a normal form
/// never return.
pub fn beta_normal(expr: Expr) -> Expr {
    match expr {
        Expr::Variable(_) => expr,
        Expr::Lambda { param, body } => Expr::Lambda { param, body: Box::new(beta_normal(*body)) },
        Expr::Application(parts) => {
            let mut parts: Vec<Expr> = parts.into_iter().map(beta_normal).collect();
            while parts.len() > 1 {
                let Expr::Lambda { param, body } = &parts[0] else { break };
                trace!(param = %param.name, id = param.id.0, "beta contraction");
                let reduced = beta_normal(apply(body, param, &parts[1]));
                parts.splice(..2, [reduced]);
            }
            match <[Expr; 1]>::try_from(parts) {
                Ok([only]) => only,
                Err(parts) => Expr::Application(parts),
            }
        }
    }
}
