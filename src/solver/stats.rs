use std::time::Duration;

use prettytable::{Cell, Row, Table};
use serde::Serialize;

use crate::solver::engine::SolverConfig;

/// Counters for one `solve` invocation, reset at its start.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStats {
    /// Number of tentative value assignments made during the search.
    pub nodes_visited: u64,
    /// Wall-clock time spent in the invocation, AC-3 included.
    pub elapsed: Duration,
}

/// Renders one row per solver configuration, for the comparative experiments
/// run across all eight flag combinations.
pub fn render_comparison_table(rows: &[(SolverConfig, bool, SearchStats)]) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("MRV"),
        Cell::new("LCV"),
        Cell::new("AC-3"),
        Cell::new("Feasible"),
        Cell::new("Nodes Visited"),
        Cell::new("Elapsed (ms)"),
    ]));

    for (config, feasible, stats) in rows {
        table.add_row(Row::new(vec![
            Cell::new(if config.mrv { "on" } else { "off" }),
            Cell::new(if config.lcv { "on" } else { "off" }),
            Cell::new(if config.ac3 { "on" } else { "off" }),
            Cell::new(if *feasible { "yes" } else { "no" }),
            Cell::new(&stats.nodes_visited.to_string()),
            Cell::new(&format!("{:.2}", stats.elapsed.as_secs_f64() * 1000.0)),
        ]));
    }

    table.to_string()
}
