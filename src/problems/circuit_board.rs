use std::fmt::Write as _;

use crate::{
    error::{Result, SolverError},
    solver::{
        assignment::Assignment,
        engine::{SolverConfig, SolverEngine},
        graph::{ConstraintGraph, Domain, Domains, TableConstraint, Value},
        stats::SearchStats,
    },
};

/// A labelled rectangular component to place on the board.
#[derive(Debug, Clone, Copy)]
pub struct Component {
    pub label: char,
    pub height: usize,
    pub width: usize,
}

impl Component {
    pub fn new(label: char, height: usize, width: usize) -> Self {
        Self {
            label,
            height,
            width,
        }
    }
}

/// Rectangle-packing frontend: place every component on a fixed-size board
/// so that no two components overlap.
///
/// Components become variables in declaration order. A placement is the
/// component's top-left cell, encoded `row * cols + col`; a variable's
/// domain is every placement that keeps the component inside the board.
/// Each component pair gets one table constraint enumerating the placement
/// pairs whose rectangles do not intersect.
pub struct CircuitBoard {
    rows: usize,
    cols: usize,
    components: Vec<Component>,
    graph: ConstraintGraph,
    domains: Domains,
}

impl CircuitBoard {
    pub fn new(rows: usize, cols: usize, components: Vec<Component>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(SolverError::Custom("board must have a positive size".into()).into());
        }

        let domains: Domains = components
            .iter()
            .map(|component| Self::placements(rows, cols, component))
            .collect();

        let mut constraints = Vec::new();
        for i in 0..components.len() {
            for j in (i + 1)..components.len() {
                let mut tuples: Vec<Vec<Value>> = Vec::new();
                for &p1 in &domains[i] {
                    for &p2 in &domains[j] {
                        if !Self::overlap(cols, &components[i], p1, &components[j], p2) {
                            tuples.push(vec![p1, p2]);
                        }
                    }
                }
                constraints.push(TableConstraint::new(vec![i, j], tuples)?);
            }
        }

        let graph = ConstraintGraph::new(components.len(), constraints)?;

        Ok(Self {
            rows,
            cols,
            components,
            graph,
            domains,
        })
    }

    /// Every in-bounds top-left offset for `component`. Empty when the
    /// component does not fit the board at all, which makes the instance
    /// trivially infeasible.
    fn placements(rows: usize, cols: usize, component: &Component) -> Domain {
        let mut placements = Domain::new();
        if component.height > rows || component.width > cols {
            return placements;
        }
        for row in 0..=(rows - component.height) {
            for col in 0..=(cols - component.width) {
                placements.insert((row * cols + col) as Value);
            }
        }
        placements
    }

    fn overlap(cols: usize, c1: &Component, p1: Value, c2: &Component, p2: Value) -> bool {
        let (r1, k1) = (p1 as usize / cols, p1 as usize % cols);
        let (r2, k2) = (p2 as usize / cols, p2 as usize % cols);
        r1 + c1.height > r2 && r2 + c2.height > r1 && k1 + c1.width > k2 && k2 + c2.width > k1
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

    /// Draws the board with every placed component's label filled in and
    /// `.` for empty cells.
    pub fn render(&self, assignment: &Assignment) -> String {
        let mut cells = vec![vec!['.'; self.cols]; self.rows];
        for (variable, component) in self.components.iter().enumerate() {
            let Some(placement) = assignment.value_of(variable) else {
                continue;
            };
            let row = placement as usize / self.cols;
            let col = placement as usize % self.cols;
            for r in row..row + component.height {
                for k in col..col + component.width {
                    cells[r][k] = component.label;
                }
            }
        }

        let mut out = String::new();
        for row in cells {
            let line: String = row.into_iter().collect();
            let _ = writeln!(out, "{line}");
        }
        out
    }
}

/// The 10x3 layout instance used by the demo binary and benches.
pub fn sample_board() -> Result<CircuitBoard> {
    CircuitBoard::new(
        3,
        10,
        vec![
            Component::new('a', 2, 3),
            Component::new('b', 2, 5),
            Component::new('c', 3, 2),
            Component::new('e', 1, 7),
        ],
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{sample_board, CircuitBoard, Component};
    use crate::solver::{engine::SolverConfig, graph::Value};

    fn rectangles_disjoint(board: &CircuitBoard, a: usize, pa: Value, b: usize, pb: Value) -> bool {
        !CircuitBoard::overlap(board.cols, &board.components[a], pa, &board.components[b], pb)
    }

    #[test]
    fn two_dominoes_fit_a_small_board() {
        // Two 1x2 components on a 2-row, 3-column board.
        let board = CircuitBoard::new(
            2,
            3,
            vec![Component::new('x', 1, 2), Component::new('y', 1, 2)],
        )
        .unwrap();

        for config in SolverConfig::grid() {
            let (solution, _stats) = board.solve(config).unwrap();
            let assignment = solution.expect("both dominoes fit");
            assert!(assignment.is_complete(2));

            let px = assignment.value_of(0).unwrap();
            let py = assignment.value_of(1).unwrap();
            assert!(rectangles_disjoint(&board, 0, px, 1, py));
        }
    }

    #[test]
    fn sample_board_is_packed_without_overlap() {
        let board = sample_board().unwrap();
        for config in SolverConfig::grid() {
            let (solution, _stats) = board.solve(config).unwrap();
            let assignment = solution.expect("the sample layout is feasible");

            for i in 0..board.components.len() {
                for j in (i + 1)..board.components.len() {
                    let pi = assignment.value_of(i).unwrap();
                    let pj = assignment.value_of(j).unwrap();
                    assert!(
                        rectangles_disjoint(&board, i, pi, j, pj),
                        "components {i} and {j} overlap"
                    );
                }
            }

            // Every label appears exactly height * width times.
            let rendered = board.render(&assignment);
            for component in &board.components {
                let count = rendered.matches(component.label).count();
                assert_eq!(count, component.height * component.width);
            }
        }
    }

    #[test]
    fn oversized_component_makes_the_instance_infeasible() {
        let board = CircuitBoard::new(
            2,
            2,
            vec![Component::new('x', 3, 1), Component::new('y', 1, 1)],
        )
        .unwrap();

        for config in SolverConfig::grid() {
            let (solution, _stats) = board.solve(config).unwrap();
            assert!(solution.is_none());
        }
    }

    #[test]
    fn exact_tiling_renders_with_no_empty_cells() {
        // Two 1x2 dominoes tile a 1x4 board exactly.
        let board = CircuitBoard::new(
            1,
            4,
            vec![Component::new('x', 1, 2), Component::new('y', 1, 2)],
        )
        .unwrap();

        let (solution, _stats) = board.solve(SolverConfig::default()).unwrap();
        let rendered = board.render(&solution.unwrap());
        assert!(!rendered.contains('.'));
        assert_eq!(rendered, "xxyy\n");
    }
}
