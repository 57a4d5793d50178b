pub mod rankings;
pub mod solver;
