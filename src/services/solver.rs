use crate::error::AppError;
use crate::models::solver::{GRID_CELLS, GRID_DIM, Puzzle, Solution};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[async_trait]
pub trait PuzzleSolver: Send + Sync {
    async fn solve(&self, grid_line: &str) -> Result<Solution, AppError>;
}

pub struct BinarySolver {
    binary: PathBuf,
}

impl BinarySolver {
    pub fn new(binary: &str) -> Self {
        BinarySolver {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl PuzzleSolver for BinarySolver {
    async fn solve(&self, grid_line: &str) -> Result<Solution, AppError> {
        let mut child = Command::new(&self.binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                AppError::Solver(format!(
                    "Failed to start solver {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        let input = format!("{} {}", GRID_DIM, grid_line);
        match child.stdin.take() {
            // Dropping the handle closes the pipe so the solver sees end of input
            Some(mut stdin) => stdin.write_all(input.as_bytes()).await.map_err(|e| {
                AppError::Solver(format!("Failed to write grid to solver: {}", e))
            })?,
            None => return Err(AppError::Solver("Solver stdin unavailable".into())),
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| AppError::Solver(format!("Failed to read solver output: {}", e)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Solver(format!(
                "Solver exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        parse_solution(&String::from_utf8_lossy(&output.stdout))
    }
}

// Solver prints -1 when the grid has no solution, otherwise one value per
// cell with 0 marking cells excluded from the solution.
pub fn parse_solution(stdout: &str) -> Result<Solution, AppError> {
    let trimmed = stdout.trim();
    if trimmed == "-1" {
        return Ok(Solution {
            solvable: false,
            cells: None,
        });
    }
    let cells: Vec<i64> = trimmed
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| AppError::Solver("Solver produced non-numeric output".into()))?;
    if cells.len() != GRID_CELLS {
        return Err(AppError::Solver(format!(
            "Expected {} cells from solver, got {}",
            GRID_CELLS,
            cells.len()
        )));
    }
    Ok(Solution {
        solvable: true,
        cells: Some(cells),
    })
}

const DEFAULT_GRID: [[i64; GRID_DIM]; GRID_DIM] = [
    [9, 4, 4, 8, 7, 5, 3],
    [2, 2, 8, 4, 7, 7, 5],
    [3, 4, 7, 3, 4, 1, 1],
    [6, 6, 4, 8, 3, 8, 1],
    [4, 2, 2, 5, 9, 7, 3],
    [9, 7, 5, 9, 8, 5, 4],
    [1, 6, 5, 6, 9, 6, 3],
];
const DEFAULT_ROW_TOTALS: [i64; GRID_DIM] = [33, 28, 8, 20, 21, 33, 21];
const DEFAULT_COL_TOTALS: [i64; GRID_DIM] = [27, 19, 21, 21, 43, 24, 9];

pub fn default_puzzle() -> Puzzle {
    Puzzle {
        grid: DEFAULT_GRID.iter().map(|row| row.to_vec()).collect(),
        row_totals: DEFAULT_ROW_TOTALS.to_vec(),
        col_totals: DEFAULT_COL_TOTALS.to_vec(),
    }
}
