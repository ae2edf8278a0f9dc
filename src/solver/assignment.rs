use im::HashMap;
use serde::Serialize;

use crate::solver::graph::{Value, VariableId};

/// A partial mapping from variables to chosen values.
///
/// The search engine grows and shrinks a single `Assignment` in place as it
/// explores. Each variable holds at most one value; the assignment is
/// complete once every variable of the problem is bound.
///
/// Heuristics and AC-3 need to ask "what if variable X held value V?"
/// without disturbing the real assignment. [`Assignment::with_binding`]
/// provides that as a scoped operation: the binding is installed, the
/// closure runs, and the previous state is restored on every exit path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Assignment {
    values: HashMap<VariableId, Value>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value bound to `variable`, if any.
    pub fn value_of(&self, variable: VariableId) -> Option<Value> {
        self.values.get(&variable).copied()
    }

    pub fn is_assigned(&self, variable: VariableId) -> bool {
        self.values.contains_key(&variable)
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True once `variable_count` variables are bound.
    pub fn is_complete(&self, variable_count: usize) -> bool {
        self.len() == variable_count
    }

    /// Binds `variable` to `value`, replacing any existing binding.
    pub fn bind(&mut self, variable: VariableId, value: Value) {
        self.values.insert(variable, value);
    }

    /// Removes the binding for `variable`, if present.
    pub fn unbind(&mut self, variable: VariableId) {
        self.values.remove(&variable);
    }

    /// Runs `f` with `variable` provisionally bound to `value`.
    ///
    /// The prior state of `variable` (bound or not) is restored before this
    /// returns, whatever `f` does.
    pub fn with_binding<T>(
        &mut self,
        variable: VariableId,
        value: Value,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let previous = self.values.insert(variable, value);
        let out = f(self);
        match previous {
            Some(prior) => {
                self.values.insert(variable, prior);
            }
            None => {
                self.values.remove(&variable);
            }
        }
        out
    }

    /// Iterates over `(variable, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, Value)> + '_ {
        self.values.iter().map(|(&variable, &value)| (variable, value))
    }
}
