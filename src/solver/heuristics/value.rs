//! Heuristics for ordering the candidate values of the branching variable.

use crate::solver::{
    assignment::Assignment,
    graph::{ConstraintGraph, Domains, Value, VariableId},
};

/// A strategy for deciding which values to try first for a variable.
///
/// Implementations return an owned, ordered list: the search mutates the
/// assignment while iterating, so borrowing out of the domain is not an
/// option. The order must be deterministic — it is, together with variable
/// selection, the sole source of which solution the engine finds first.
pub trait ValueOrderingHeuristic {
    fn order_values(
        &self,
        graph: &ConstraintGraph,
        domains: &Domains,
        variable: VariableId,
        assignment: &mut Assignment,
    ) -> Vec<Value>;
}

/// Tries values in the domain's natural (ascending) order.
pub struct IdentityValueHeuristic;

impl ValueOrderingHeuristic for IdentityValueHeuristic {
    fn order_values(
        &self,
        _graph: &ConstraintGraph,
        domains: &Domains,
        variable: VariableId,
        _assignment: &mut Assignment,
    ) -> Vec<Value> {
        domains[variable].iter().copied().collect()
    }
}

/// Least-constraining-value: tries first the value that leaves the most
/// options open for the other unassigned variables.
///
/// Scores come from [`ConstraintGraph::least_constraining_value`]; the sort
/// is stable, so equally constraining values keep their natural order.
pub struct LeastConstrainingValueHeuristic;

impl ValueOrderingHeuristic for LeastConstrainingValueHeuristic {
    fn order_values(
        &self,
        graph: &ConstraintGraph,
        domains: &Domains,
        variable: VariableId,
        assignment: &mut Assignment,
    ) -> Vec<Value> {
        let mut values: Vec<Value> = domains[variable].iter().copied().collect();
        values.sort_by_cached_key(|&value| {
            graph.least_constraining_value(domains, variable, value, assignment)
        });
        values
    }
}

#[cfg(test)]
mod tests {
    use im::ordset;

    use super::{IdentityValueHeuristic, LeastConstrainingValueHeuristic, ValueOrderingHeuristic};
    use crate::solver::{
        assignment::Assignment,
        graph::{ConstraintGraph, Domains, TableConstraint},
    };

    #[test]
    fn identity_order_is_ascending() {
        let graph = ConstraintGraph::new(1, []).unwrap();
        let domains: Domains = vec![ordset![3, 1, 2]];
        let mut assignment = Assignment::new();

        let order = IdentityValueHeuristic.order_values(&graph, &domains, 0, &mut assignment);
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn lcv_puts_the_least_constraining_value_first() {
        // Variable 1's value 0 leaves variable 2 one option; value 1 leaves
        // it two. LCV must try 1 before 0.
        let constraint =
            TableConstraint::new(vec![1, 2], vec![vec![0, 1], vec![1, 0], vec![1, 1]]).unwrap();
        let graph = ConstraintGraph::new(3, [constraint]).unwrap();
        let domains: Domains = vec![ordset![0, 1], ordset![0, 1], ordset![0, 1]];
        let mut assignment = Assignment::new();

        let order =
            LeastConstrainingValueHeuristic.order_values(&graph, &domains, 1, &mut assignment);
        assert_eq!(order, vec![1, 0]);
        assert!(assignment.is_empty());
    }
}
