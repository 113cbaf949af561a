pub mod matrix;
pub mod participant;
