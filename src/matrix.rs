//! Dense travel-cost matrix over the depot and demand points.

use serde::{Deserialize, Serialize};

/// An n x n matrix of travel costs in seconds, stored row-major.
///
/// Index 0 is the depot and indices 1..n are demand points in request
/// order. The diagonal is zero; `f64::INFINITY` marks an unreachable pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostMatrix {
    data: Vec<f64>,
    size: usize,
}

impl CostMatrix {
    /// Create a matrix of the given size with every cost zero.
    pub fn new(size: usize) -> Self {
        CostMatrix {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Build a matrix from explicit rows.
    ///
    /// Returns `None` unless the rows form a square grid.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(CostMatrix {
            data: rows.into_iter().flatten().collect(),
            size,
        })
    }

    /// Travel cost from `from` to `to` in seconds.
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Set the travel cost from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.size + to] = cost;
    }

    /// Number of locations covered by the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether travel from `from` to `to` has a finite cost.
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.get(from, to).is_finite()
    }

    /// Whether the matrix is symmetric within the given tolerance.
    ///
    /// Network-backed matrices need not be; haversine estimates are.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}
