pub mod cycle;
pub mod debt_graph;
