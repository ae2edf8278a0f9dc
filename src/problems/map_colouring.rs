use std::collections::HashMap;
use std::fmt::Write as _;

use crate::{
    error::{Result, SolverError},
    solver::{
        assignment::Assignment,
        engine::{SolverConfig, SolverEngine},
        graph::{ConstraintGraph, Domains, TableConstraint, Value},
        stats::SearchStats,
    },
};

/// Region-colouring frontend: colour every region so that no two adjacent
/// regions share a colour.
///
/// Regions become variables in declaration order, colours become the domain
/// values `0..k`, and each adjacency becomes one table constraint whose
/// relation is every ordered pair of differing colours.
pub struct MapColouring {
    regions: Vec<String>,
    colours: Vec<String>,
    graph: ConstraintGraph,
    domains: Domains,
}

impl MapColouring {
    /// Builds the CSP for a map. Adjacencies must reference declared region
    /// names; an unknown name is a construction error.
    pub fn new(regions: &[&str], colours: &[&str], adjacencies: &[(&str, &str)]) -> Result<Self> {
        let index: HashMap<&str, usize> = regions
            .iter()
            .enumerate()
            .map(|(i, &name)| (name, i))
            .collect();

        let mut differing: Vec<Vec<Value>> = Vec::new();
        for a in 0..colours.len() as Value {
            for b in 0..colours.len() as Value {
                if a != b {
                    differing.push(vec![a, b]);
                }
            }
        }

        let lookup = |name: &str| -> Result<usize> {
            index
                .get(name)
                .copied()
                .ok_or_else(|| SolverError::Custom(format!("unknown region: {name}")).into())
        };

        let mut constraints = Vec::with_capacity(adjacencies.len());
        for &(a, b) in adjacencies {
            constraints.push(TableConstraint::new(
                vec![lookup(a)?, lookup(b)?],
                differing.clone(),
            )?);
        }

        let graph = ConstraintGraph::new(regions.len(), constraints)?;
        let domains: Domains = vec![(0..colours.len() as Value).collect(); regions.len()];

        Ok(Self {
            regions: regions.iter().map(|&r| r.to_owned()).collect(),
            colours: colours.iter().map(|&c| c.to_owned()).collect(),
            graph,
            domains,
        })
    }

    pub fn graph(&self) -> &ConstraintGraph {
        &self.graph
    }

    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    pub fn solve(&self, config: SolverConfig) -> Result<(Option<Assignment>, SearchStats)> {
        SolverEngine::from_config(config).solve(&self.graph, self.domains.clone())
    }

    /// Renders a complete assignment as one `region: colour` line per
    /// region, in declaration order.
    pub fn render(&self, assignment: &Assignment) -> String {
        let mut out = String::new();
        for (variable, region) in self.regions.iter().enumerate() {
            let colour = match assignment.value_of(variable) {
                Some(value) => self.colours[value as usize].as_str(),
                None => "?",
            };
            let _ = writeln!(out, "{region}: {colour}");
        }
        out
    }
}

/// The Australian states instance used by the demo binary and benches.
pub fn australia() -> Result<MapColouring> {
    MapColouring::new(
        &["WA", "NT", "SA", "Q", "NSW", "V", "T"],
        &["red", "green", "blue"],
        &[
            ("WA", "NT"),
            ("WA", "SA"),
            ("NT", "SA"),
            ("NT", "Q"),
            ("SA", "Q"),
            ("SA", "NSW"),
            ("SA", "V"),
            ("Q", "NSW"),
            ("NSW", "V"),
        ],
    )
}
