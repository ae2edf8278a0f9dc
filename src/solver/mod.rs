pub mod assignment;
pub mod engine;
pub mod graph;
pub mod heuristics;
pub mod stats;
pub mod work_list;
