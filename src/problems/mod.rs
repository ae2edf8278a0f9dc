//! Problem-specific frontends built on top of the generic engine.
//!
//! Each frontend translates its own instance description into variable
//! domains and a [`crate::solver::graph::ConstraintGraph`], and renders a
//! found assignment back into a human-readable form. The engine itself
//! knows nothing about colours or rectangles.

pub mod circuit_board;
pub mod map_colouring;
