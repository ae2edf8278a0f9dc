use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Result, SolverError},
    solver::{
        assignment::Assignment,
        graph::{ConstraintGraph, Domains},
        heuristics::{
            value::{IdentityValueHeuristic, LeastConstrainingValueHeuristic, ValueOrderingHeuristic},
            variable::{
                MinimumRemainingValuesHeuristic, SelectFirstHeuristic, VariableSelectionHeuristic,
            },
        },
        stats::SearchStats,
    },
};

/// The three independent feature flags of the engine. All eight combinations
/// are legal and produce the same feasibility verdict; only the node count
/// and the particular solution found may differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Minimum-remaining-values variable ordering.
    pub mrv: bool,
    /// Least-constraining-value value ordering.
    pub lcv: bool,
    /// AC-3 domain pruning before the search.
    pub ac3: bool,
}

impl SolverConfig {
    /// Every flag combination, for comparative experiments.
    pub fn grid() -> Vec<SolverConfig> {
        let mut configs = Vec::with_capacity(8);
        for mrv in [false, true] {
            for lcv in [false, true] {
                for ac3 in [false, true] {
                    configs.push(SolverConfig { mrv, lcv, ac3 });
                }
            }
        }
        configs
    }
}

/// The backtracking search engine.
///
/// Holds the variable- and value-ordering strategies and drives a recursive
/// depth-first search over partial assignments, consulting a
/// [`ConstraintGraph`] for satisfaction checks. The engine owns no problem
/// state between invocations; domains are passed per call and the working
/// assignment lives and dies inside [`SolverEngine::solve`].
pub struct SolverEngine {
    variable_heuristic: Box<dyn VariableSelectionHeuristic>,
    value_heuristic: Box<dyn ValueOrderingHeuristic>,
    ac3: bool,
}

impl SolverEngine {
    pub fn new(
        variable_heuristic: Box<dyn VariableSelectionHeuristic>,
        value_heuristic: Box<dyn ValueOrderingHeuristic>,
        ac3: bool,
    ) -> Self {
        Self {
            variable_heuristic,
            value_heuristic,
            ac3,
        }
    }

    /// Maps the configuration flags onto the corresponding heuristics.
    pub fn from_config(config: SolverConfig) -> Self {
        let variable_heuristic: Box<dyn VariableSelectionHeuristic> = if config.mrv {
            Box::new(MinimumRemainingValuesHeuristic)
        } else {
            Box::new(SelectFirstHeuristic)
        };
        let value_heuristic: Box<dyn ValueOrderingHeuristic> = if config.lcv {
            Box::new(LeastConstrainingValueHeuristic)
        } else {
            Box::new(IdentityValueHeuristic)
        };
        Self::new(variable_heuristic, value_heuristic, config.ac3)
    }

    /// Searches for an assignment satisfying every constraint of `graph`.
    ///
    /// If AC-3 is enabled it first shrinks a working copy of the domains; an
    /// emptied domain proves infeasibility without any search. The first
    /// solution found is returned; infeasibility is the `Ok((None, _))`
    /// case, not an error.
    ///
    /// # Errors
    ///
    /// Fails only on malformed input: a domain list whose length disagrees
    /// with the graph's variable count.
    pub fn solve(
        &self,
        graph: &ConstraintGraph,
        mut domains: Domains,
    ) -> Result<(Option<Assignment>, SearchStats)> {
        if domains.len() != graph.variable_count() {
            return Err(SolverError::DomainCountMismatch {
                expected: graph.variable_count(),
                actual: domains.len(),
            }
            .into());
        }

        let mut stats = SearchStats::default();
        let started = Instant::now();

        if self.ac3 {
            graph.ac3(&mut domains);
            if domains.iter().any(|domain| domain.is_empty()) {
                debug!("ac-3 emptied a domain; problem is infeasible");
                stats.elapsed = started.elapsed();
                return Ok((None, stats));
            }
        }

        let mut assignment = Assignment::new();
        let found = self.backtrack(graph, &domains, &mut assignment, &mut stats);
        stats.elapsed = started.elapsed();

        if found {
            debug!(nodes_visited = stats.nodes_visited, "solution found");
            Ok((Some(assignment), stats))
        } else {
            debug!(nodes_visited = stats.nodes_visited, "search space exhausted");
            Ok((None, stats))
        }
    }

    /// One level of the depth-first search. Returns true when the assignment
    /// has been extended to a complete, satisfying one.
    ///
    /// Bindings are retained up the success path, so the caller's assignment
    /// holds the full solution when this returns true. On every failure path
    /// the tentative binding is removed before the next candidate is tried
    /// or the dead end is reported.
    fn backtrack(
        &self,
        graph: &ConstraintGraph,
        domains: &Domains,
        assignment: &mut Assignment,
        stats: &mut SearchStats,
    ) -> bool {
        let Some(variable) = self
            .variable_heuristic
            .select_variable(graph, domains, assignment)
        else {
            // No unassigned variable remains: the assignment is complete.
            return true;
        };

        for value in self
            .value_heuristic
            .order_values(graph, domains, variable, assignment)
        {
            stats.nodes_visited += 1;
            assignment.bind(variable, value);
            if graph.is_satisfied(assignment, variable)
                && self.backtrack(graph, domains, assignment, stats)
            {
                return true;
            }
            assignment.unbind(variable);
        }

        false
    }
}
