pub mod parser;
pub mod rankings;
pub mod solver;
