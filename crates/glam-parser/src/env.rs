//! Binder environment: per-name stacks of binder ids.
//!
//! Every lambda parameter pushes an id for its name while its body is being
//! parsed and pops it afterwards. Variable occurrences resolve to the id on
//! top of their name's stack, or [`BinderId::FREE`] when nothing binds them.

use glam_ast::ast::{BinderId, Variable};
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::trace;

#[derive(Debug, Clone)]
struct BinderStack {
    ids: Vec<i64>,
    // Next id to hand out; never rewinds when a binding is popped.
    next: i64,
}

impl BinderStack {
    fn new() -> Self {
        Self { ids: vec![0], next: 1 }
    }
}

#[derive(Debug, Default)]
pub struct Environment {
    stacks: HashMap<String, BinderStack>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a binding for `name` and return its id.
    ///
    /// The first binding ever opened for a name is `0`; every later one,
    /// shadowing or not, takes the next value of that name's counter.
    pub fn register(&mut self, name: &str) -> BinderId {
        let id = match self.stacks.get_mut(name) {
            None => {
                self.stacks.insert(name.to_string(), BinderStack::new());
                0
            }
            Some(stack) => {
                let id = stack.next;
                stack.next += 1;
                stack.ids.push(id);
                id
            }
        };
        trace!(binder = name, id, "register binder");
        BinderId(id)
    }

    /// Close the innermost binding for `name`.
    ///
    /// # Panics
    ///
    /// Panics when `name` has no open binding.
    pub fn unregister(&mut self, name: &str) {
        let popped = self.stacks.get_mut(name).and_then(|stack| stack.ids.pop());
        assert!(popped.is_some(), "unregister of `{name}` without a matching register");
        trace!(binder = name, "unregister binder");
    }

    pub fn resolve(&self, name: &str) -> BinderId {
        self.stacks
            .get(name)
            .and_then(|stack| stack.ids.last().copied())
            .map(BinderId)
            .unwrap_or(BinderId::FREE)
    }

    /// Number of open bindings for `name`.
    pub fn depth(&self, name: &str) -> usize {
        self.stacks.get(name).map_or(0, |stack| stack.ids.len())
    }
}

/// An open binding that is closed again when dropped.
#[derive(Debug)]
pub struct Scope<'a> {
    env: &'a RefCell<Environment>,
    param: Variable,
}

impl Scope<'_> {
    pub fn param(&self) -> &Variable {
        &self.param
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.env.borrow_mut().unregister(&self.param.name);
    }
}

/// Register `name` in `env` for as long as the returned scope lives.
pub fn bind<'a>(env: &'a RefCell<Environment>, name: &str) -> Scope<'a> {
    let id = env.borrow_mut().register(name);
    Scope { env, param: Variable::new(name, id) }
}
