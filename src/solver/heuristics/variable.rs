//! Heuristics for choosing which variable the search branches on next.

use crate::solver::{
    assignment::Assignment,
    graph::{ConstraintGraph, Domains, VariableId},
};

/// A strategy for selecting the next unassigned variable.
///
/// The assignment is passed mutably because counting heuristics probe it
/// with provisional bindings; every implementation must leave it exactly as
/// it found it.
pub trait VariableSelectionHeuristic {
    /// Returns the variable to branch on, or `None` when all variables are
    /// assigned (the search is complete).
    fn select_variable(
        &self,
        graph: &ConstraintGraph,
        domains: &Domains,
        assignment: &mut Assignment,
    ) -> Option<VariableId>;
}

/// Selects the lowest-index unassigned variable, i.e. static declaration
/// order. The deterministic baseline the MRV heuristic is compared against.
pub struct SelectFirstHeuristic;

impl VariableSelectionHeuristic for SelectFirstHeuristic {
    fn select_variable(
        &self,
        _graph: &ConstraintGraph,
        domains: &Domains,
        assignment: &mut Assignment,
    ) -> Option<VariableId> {
        (0..domains.len()).find(|&variable| !assignment.is_assigned(variable))
    }
}

/// Minimum-remaining-values: branch on the variable with the fewest values
/// still consistent with the current assignment. A fail-first strategy; the
/// count is delegated to [`ConstraintGraph::minimum_remaining_value`], which
/// breaks ties to the lower variable index.
pub struct MinimumRemainingValuesHeuristic;

impl VariableSelectionHeuristic for MinimumRemainingValuesHeuristic {
    fn select_variable(
        &self,
        graph: &ConstraintGraph,
        domains: &Domains,
        assignment: &mut Assignment,
    ) -> Option<VariableId> {
        graph.minimum_remaining_value(domains, assignment)
    }
}
