//! Tabula is a generic finite-domain constraint satisfaction (CSP) solver.
//!
//! Problems are given in extension: every variable has a finite set of
//! integer candidate values, and every constraint is a table — an ordered
//! scope of variables plus the set of value tuples that are jointly
//! allowed. The engine is domain-agnostic; the meaning of the integers
//! belongs to the calling code.
//!
//! # Core Concepts
//!
//! - **[`TableConstraint`]**: a scope and its allowed-tuple relation.
//! - **[`ConstraintGraph`]**: the constraint store, indexed per variable,
//!   carrying satisfaction checks, the AC-3 inference pass and the
//!   consistency-counting heuristics.
//! - **[`SolverEngine`]**: backtracking search with three independent
//!   switches — MRV variable ordering, LCV value ordering, AC-3
//!   preprocessing — configured through [`SolverConfig`].
//!
//! The engine returns the first satisfying assignment it finds, or `None`
//! when the problem is infeasible, together with [`SearchStats`] for the
//! invocation. Infeasibility is an ordinary result, never an error.
//!
//! [`TableConstraint`]: solver::graph::TableConstraint
//! [`ConstraintGraph`]: solver::graph::ConstraintGraph
//! [`SolverEngine`]: solver::engine::SolverEngine
//! [`SolverConfig`]: solver::engine::SolverConfig
//! [`SearchStats`]: solver::stats::SearchStats
//!
//! # Example: A Simple 2-Variable Problem
//!
//! Solve `?A != ?B` where `?A` can be `1` or `2` and `?B` can only be `1`.
//! The engine must deduce that `?A` is `2`.
//!
//! ```
//! use im::ordset;
//! use tabula::solver::engine::{SolverConfig, SolverEngine};
//! use tabula::solver::graph::{ConstraintGraph, Domains, TableConstraint};
//!
//! let differ = TableConstraint::new(vec![0, 1], vec![vec![1, 2], vec![2, 1]]).unwrap();
//! let graph = ConstraintGraph::new(2, [differ]).unwrap();
//! let domains: Domains = vec![ordset![1, 2], ordset![1]];
//!
//! let engine = SolverEngine::from_config(SolverConfig::default());
//! let (solution, stats) = engine.solve(&graph, domains).unwrap();
//!
//! let assignment = solution.expect("a solution exists");
//! assert_eq!(assignment.value_of(0), Some(2));
//! assert_eq!(assignment.value_of(1), Some(1));
//! assert!(stats.nodes_visited > 0);
//! ```

pub mod error;
pub mod problems;
pub mod solver;
