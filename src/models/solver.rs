use serde::{Deserialize, Serialize};

pub const GRID_DIM: usize = 7;
pub const GRID_CELLS: usize = GRID_DIM * GRID_DIM;
pub const GRID_INPUT_VALUES: usize = GRID_CELLS + 2 * GRID_DIM;

#[derive(Debug, Deserialize)]
pub struct SolveRequest {
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub solvable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Puzzle {
    pub grid: Vec<Vec<i64>>,
    pub row_totals: Vec<i64>,
    pub col_totals: Vec<i64>,
}
