use std::collections::HashMap;

use im::OrdSet;
use tracing::debug;

use crate::{
    error::{Result, SolverError},
    solver::{assignment::Assignment, work_list::WorkList},
};

/// A variable is identified solely by its index into the domain list.
pub type VariableId = usize;

/// Candidate values are opaque integers; their meaning belongs to the
/// problem frontend that built the domains.
pub type Value = i64;

pub type ConstraintId = usize;

/// The candidate-value set for one variable.
///
/// Ordered so that "natural order" value iteration is deterministic: the
/// heuristics must be the only source of variation in which solution the
/// engine returns.
pub type Domain = OrdSet<Value>;

/// One domain per variable, indexed by [`VariableId`].
pub type Domains = Vec<Domain>;

/// A constraint given in extension: an ordered scope of variables together
/// with the set of value tuples (same length and order as the scope) that
/// are jointly allowed.
#[derive(Debug, Clone)]
pub struct TableConstraint {
    scope: Vec<VariableId>,
    relation: im::HashSet<Vec<Value>>,
}

impl TableConstraint {
    /// Builds a table constraint, validating the scope and tuple arity.
    ///
    /// The scope must name at least two distinct variables, and every tuple
    /// of the relation must match the scope's arity. Violations are
    /// construction-time errors, never runtime search failures.
    pub fn new(
        scope: Vec<VariableId>,
        tuples: impl IntoIterator<Item = Vec<Value>>,
    ) -> Result<Self> {
        if scope.len() < 2 {
            return Err(SolverError::ScopeTooSmall(scope.len()).into());
        }
        for (i, variable) in scope.iter().enumerate() {
            if scope[..i].contains(variable) {
                return Err(SolverError::DuplicateScopeVariable(*variable).into());
            }
        }

        let mut relation = im::HashSet::new();
        for tuple in tuples {
            if tuple.len() != scope.len() {
                return Err(SolverError::ArityMismatch {
                    scope_arity: scope.len(),
                    tuple_arity: tuple.len(),
                }
                .into());
            }
            relation.insert(tuple);
        }

        Ok(Self { scope, relation })
    }

    pub fn scope(&self) -> &[VariableId] {
        &self.scope
    }

    pub fn relation(&self) -> &im::HashSet<Vec<Value>> {
        &self.relation
    }

    /// Checks the constraint against an assignment covering its full scope.
    /// Returns `None` if some scope variable is unassigned.
    fn check(&self, assignment: &Assignment) -> Option<bool> {
        let tuple: Vec<Value> = self
            .scope
            .iter()
            .map(|&variable| assignment.value_of(variable))
            .collect::<Option<_>>()?;
        Some(self.relation.contains(&tuple))
    }
}

/// The constraint store, indexed per variable.
///
/// Owns every [`TableConstraint`] of a problem and a map from each variable
/// to the constraints touching it, so that "which constraints must I check
/// when variable X changes" is a direct lookup. The graph also carries the
/// AC-3 inference pass and the two consistency-counting heuristics, since
/// all of them are phrased in terms of satisfaction checks.
#[derive(Debug, Clone)]
pub struct ConstraintGraph {
    variable_count: usize,
    constraints: Vec<TableConstraint>,
    by_variable: HashMap<VariableId, Vec<ConstraintId>>,
}

impl ConstraintGraph {
    /// Builds the graph, validating that every scope stays inside
    /// `[0, variable_count)`.
    pub fn new(
        variable_count: usize,
        constraints: impl IntoIterator<Item = TableConstraint>,
    ) -> Result<Self> {
        let constraints: Vec<TableConstraint> = constraints.into_iter().collect();

        let mut by_variable: HashMap<VariableId, Vec<ConstraintId>> = HashMap::new();
        for (constraint_id, constraint) in constraints.iter().enumerate() {
            for &variable in constraint.scope() {
                if variable >= variable_count {
                    return Err(SolverError::VariableOutOfRange {
                        variable,
                        variable_count,
                    }
                    .into());
                }
                by_variable.entry(variable).or_default().push(constraint_id);
            }
        }

        Ok(Self {
            variable_count,
            constraints,
            by_variable,
        })
    }

    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    pub fn constraints(&self) -> &[TableConstraint] {
        &self.constraints
    }

    /// Checks every constraint touching `changed` whose scope is fully
    /// covered by `assignment`. Returns false on the first violated
    /// relation.
    ///
    /// Constraints with a partially covered scope are skipped: satisfaction
    /// is evaluated lazily, only once a constraint becomes fully assigned.
    /// This trades early pruning for a simpler check, and the heuristics'
    /// consistency counts depend on exactly this timing.
    pub fn is_satisfied(&self, assignment: &Assignment, changed: VariableId) -> bool {
        let Some(touching) = self.by_variable.get(&changed) else {
            return true;
        };
        for &constraint_id in touching {
            if self.constraints[constraint_id].check(assignment) == Some(false) {
                return false;
            }
        }
        true
    }

    /// The MRV heuristic: among unassigned variables, the one with the
    /// fewest values individually consistent with the current assignment.
    ///
    /// Ties break to the lowest variable index. Returns `None` when every
    /// variable is assigned.
    pub fn minimum_remaining_value(
        &self,
        domains: &Domains,
        assignment: &mut Assignment,
    ) -> Option<VariableId> {
        let mut best: Option<(VariableId, usize)> = None;
        for (variable, domain) in domains.iter().enumerate() {
            if assignment.is_assigned(variable) {
                continue;
            }
            let remaining = self.remaining_values(domain, variable, assignment);
            match best {
                Some((_, fewest)) if fewest <= remaining => {}
                _ => best = Some((variable, remaining)),
            }
        }
        best.map(|(variable, _)| variable)
    }

    /// The LCV score for binding `value` to `variable`: the negated sum,
    /// over every other unassigned variable, of its individually consistent
    /// value count. Sorting candidates by this score ascending puts the
    /// value that leaves the most options open first.
    ///
    /// The provisional binding is undone before this returns.
    pub fn least_constraining_value(
        &self,
        domains: &Domains,
        variable: VariableId,
        value: Value,
        assignment: &mut Assignment,
    ) -> i64 {
        assignment.with_binding(variable, value, |assignment| {
            let mut open: i64 = 0;
            for (other, domain) in domains.iter().enumerate() {
                if other == variable || assignment.is_assigned(other) {
                    continue;
                }
                open += self.remaining_values(domain, other, assignment) as i64;
            }
            -open
        })
    }

    /// Counts the values of `domain` that `variable` could take without
    /// violating any fully assigned constraint, by trying each one.
    fn remaining_values(
        &self,
        domain: &Domain,
        variable: VariableId,
        assignment: &mut Assignment,
    ) -> usize {
        domain
            .iter()
            .filter(|&&value| {
                assignment.with_binding(variable, value, |assignment| {
                    self.is_satisfied(assignment, variable)
                })
            })
            .count()
    }

    /// Enforces arc consistency over `domains` (AC-3), removing values with
    /// no support. Removal is sound: a value is only deleted when no value
    /// of the paired variable can jointly satisfy the constraints, so no
    /// complete satisfying assignment is lost. It is not complete — arc
    /// consistency is weaker than global consistency.
    ///
    /// A domain emptied here proves the problem infeasible; the caller is
    /// expected to check for empty domains before searching.
    pub fn ac3(&self, domains: &mut Domains) {
        let variable_count = domains.len();
        let mut worklist = WorkList::new();
        for a in 0..variable_count {
            for b in 0..variable_count {
                if a != b {
                    worklist.push_back(a, b);
                }
            }
        }

        let mut assignment = Assignment::new();
        while let Some((a, b)) = worklist.pop_front() {
            let mut unsupported = Vec::new();
            for &value in domains[a].iter() {
                let keep = assignment.with_binding(a, value, |assignment| {
                    if !self.is_satisfied(assignment, a) {
                        // The value already fails on its own; leave it for
                        // the search to reject rather than pruning here.
                        return true;
                    }
                    domains[b].iter().any(|&support| {
                        assignment.with_binding(b, support, |assignment| {
                            self.is_satisfied(assignment, b)
                        })
                    })
                });
                if !keep {
                    unsupported.push(value);
                    // Shrinking `a` may invalidate supports established
                    // elsewhere; revisit every arc pointing at `a`.
                    for i in 0..variable_count {
                        if i != a {
                            worklist.push_back(i, a);
                        }
                    }
                }
            }
            if !unsupported.is_empty() {
                debug!(
                    variable = a,
                    against = b,
                    removed = unsupported.len(),
                    "ac-3 removed unsupported values"
                );
                for value in unsupported {
                    domains[a].remove(&value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use im::ordset;

    use super::{ConstraintGraph, Domains, TableConstraint, Value};
    use crate::solver::assignment::Assignment;

    fn differ_pairs(count: Value) -> Vec<Vec<Value>> {
        let mut tuples = Vec::new();
        for a in 0..count {
            for b in 0..count {
                if a != b {
                    tuples.push(vec![a, b]);
                }
            }
        }
        tuples
    }

    /// Triangle: three variables, each pair must differ.
    fn triangle(colours: Value) -> (ConstraintGraph, Domains) {
        let constraints = [(0, 1), (0, 2), (1, 2)]
            .into_iter()
            .map(|(a, b)| TableConstraint::new(vec![a, b], differ_pairs(colours)).unwrap());
        let graph = ConstraintGraph::new(3, constraints).unwrap();
        let domains = vec![(0..colours).collect(); 3];
        (graph, domains)
    }

    #[test]
    fn scope_must_have_at_least_two_variables() {
        assert!(TableConstraint::new(vec![0], vec![vec![1]]).is_err());
    }

    #[test]
    fn scope_variables_must_be_distinct() {
        assert!(TableConstraint::new(vec![1, 1], differ_pairs(2)).is_err());
    }

    #[test]
    fn tuple_arity_must_match_scope() {
        assert!(TableConstraint::new(vec![0, 1], vec![vec![1, 2, 3]]).is_err());
    }

    #[test]
    fn scope_variables_must_be_in_range() {
        let constraint = TableConstraint::new(vec![0, 5], differ_pairs(2)).unwrap();
        assert!(ConstraintGraph::new(3, [constraint]).is_err());
    }

    #[test]
    fn partially_covered_constraints_are_not_checked() {
        let (graph, _) = triangle(2);
        let mut assignment = Assignment::new();
        assignment.bind(0, 0);
        // Variables 1 and 2 are unassigned, so nothing can be violated yet.
        assert!(graph.is_satisfied(&assignment, 0));

        assignment.bind(1, 0);
        assert!(!graph.is_satisfied(&assignment, 1));
        assignment.bind(1, 1);
        assert!(graph.is_satisfied(&assignment, 1));
    }

    #[test]
    fn unconstrained_variables_are_always_satisfied() {
        let constraint = TableConstraint::new(vec![0, 1], differ_pairs(2)).unwrap();
        let graph = ConstraintGraph::new(3, [constraint]).unwrap();
        let mut assignment = Assignment::new();
        assignment.bind(2, 42);
        assert!(graph.is_satisfied(&assignment, 2));
    }

    #[test]
    fn mrv_picks_the_most_constrained_variable() {
        let (graph, domains) = triangle(3);
        let mut assignment = Assignment::new();
        assignment.bind(0, 0);
        // Variables 1 and 2 each have two consistent values left; the tie
        // breaks to the lower index.
        assert_eq!(graph.minimum_remaining_value(&domains, &mut assignment), Some(1));

        assignment.bind(1, 1);
        // Variable 2 now has a single consistent value.
        assert_eq!(graph.minimum_remaining_value(&domains, &mut assignment), Some(2));

        assignment.bind(2, 2);
        assert_eq!(graph.minimum_remaining_value(&domains, &mut assignment), None);
    }

    #[test]
    fn mrv_leaves_the_assignment_untouched() {
        let (graph, domains) = triangle(3);
        let mut assignment = Assignment::new();
        assignment.bind(0, 0);
        let before = assignment.clone();
        graph.minimum_remaining_value(&domains, &mut assignment);
        assert_eq!(assignment, before);
    }

    #[test]
    fn lcv_prefers_the_value_that_leaves_most_options() {
        // Chain 0-1, 1-2 with a relation that makes value 0 for variable 1
        // more constraining than value 1.
        let left = TableConstraint::new(vec![0, 1], differ_pairs(2)).unwrap();
        // If variable 1 takes 0, variable 2 has one option; if 1, two.
        let right =
            TableConstraint::new(vec![1, 2], vec![vec![0, 1], vec![1, 0], vec![1, 1]]).unwrap();
        let graph = ConstraintGraph::new(3, [left, right]).unwrap();
        let domains: Domains = vec![ordset![0, 1], ordset![0, 1], ordset![0, 1]];

        let mut assignment = Assignment::new();
        let score_zero = graph.least_constraining_value(&domains, 1, 0, &mut assignment);
        let score_one = graph.least_constraining_value(&domains, 1, 1, &mut assignment);
        assert!(score_one < score_zero);
        assert!(assignment.is_empty());
    }

    #[test]
    fn ac3_prunes_through_a_pre_constrained_neighbour() {
        // A (variable 1) and B (variable 2) must differ; a third variable
        // with a singleton domain pins A to value 2, so AC-3 should remove
        // 2 from B's domain.
        let pin = TableConstraint::new(vec![0, 1], vec![vec![0, 2]]).unwrap();
        let differ = TableConstraint::new(vec![1, 2], differ_pairs(4)).unwrap();
        let graph = ConstraintGraph::new(3, [pin, differ]).unwrap();
        let mut domains: Domains = vec![ordset![0], ordset![1, 2, 3], ordset![1, 2, 3]];

        graph.ac3(&mut domains);

        assert_eq!(domains[1], ordset![2]);
        assert_eq!(domains[2], ordset![1, 3]);
    }

    #[test]
    fn ac3_is_idempotent() {
        let (graph, mut domains) = triangle(3);
        domains[0] = ordset![0];
        graph.ac3(&mut domains);
        let after_first = domains.clone();
        graph.ac3(&mut domains);
        assert_eq!(domains, after_first);
    }

    #[test]
    fn ac3_empties_domains_of_an_infeasible_pair() {
        // Two variables that must differ, but both domains are {0}.
        let differ = TableConstraint::new(vec![0, 1], differ_pairs(2)).unwrap();
        let graph = ConstraintGraph::new(2, [differ]).unwrap();
        let mut domains: Domains = vec![ordset![0], ordset![0]];

        graph.ac3(&mut domains);

        assert!(domains.iter().any(|domain| domain.is_empty()));
    }

    #[test]
    fn ac3_never_removes_a_supported_value() {
        // Soundness on the 3-colour triangle: every value participates in
        // some complete solution, so nothing may be removed.
        let (graph, mut domains) = triangle(3);
        let before = domains.clone();
        graph.ac3(&mut domains);
        assert_eq!(domains, before);
    }
}
