//! Regular-grid scenario topology.
//!
//! Builds a rows × cols lattice with two-way streets between orthogonal
//! neighbours.  Node numbering is row-major: node `(r, c)` has id
//! `r * cols + c`, which presets rely on when naming blocked street pairs.

use cf_core::NodeId;

use crate::{City, CityBuilder, CityError, CityResult};

/// Dimensions and per-street parameters of a regular grid.
#[derive(Debug, Clone, Copy)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
    /// Length of every street in the grid.
    pub street_length: f64,
    /// Capacity of every street in the grid.
    pub street_capacity: f64,
}

impl GridSpec {
    /// Grid with unit-length streets of the given capacity.
    pub fn new(rows: u32, cols: u32, street_capacity: f64) -> Self {
        Self { rows, cols, street_length: 1.0, street_capacity }
    }

    /// Node id at grid position `(row, col)`.
    #[inline]
    pub fn node_at(&self, row: u32, col: u32) -> NodeId {
        NodeId(row * self.cols + col)
    }

    /// Build the lattice.
    ///
    /// Errors if either dimension is zero; a degenerate grid is a preset
    /// authoring mistake, not something to silently produce.
    pub fn build(&self) -> CityResult<City> {
        if self.rows == 0 || self.cols == 0 {
            return Err(CityError::EmptyGrid { rows: self.rows, cols: self.cols });
        }

        let edge_estimate = 4 * (self.rows * self.cols) as usize;
        let mut b = CityBuilder::with_capacity(edge_estimate);
        b.add_nodes((self.rows * self.cols) as usize);

        // Horizontal streets (left-right neighbours).
        for row in 0..self.rows {
            for col in 0..self.cols - 1 {
                let from = self.node_at(row, col);
                let to = self.node_at(row, col + 1);
                b.add_two_way(from, to, self.street_length, self.street_capacity);
            }
        }

        // Vertical streets (top-bottom neighbours).
        for row in 0..self.rows - 1 {
            for col in 0..self.cols {
                let from = self.node_at(row, col);
                let to = self.node_at(row + 1, col);
                b.add_two_way(from, to, self.street_length, self.street_capacity);
            }
        }

        Ok(b.build())
    }
}

/// Close the streets between the given node pairs, in both directions.
///
/// Errors on a pair with no connecting street — a misnamed closure in a
/// preset should fail loudly rather than be ignored.
pub fn block_streets(city: &mut City, pairs: &[(NodeId, NodeId)]) -> CityResult<()> {
    for &(a, b) in pairs {
        let forward = city
            .find_edge(a, b)
            .ok_or(CityError::NoSuchStreet { from: a, to: b })?;
        city.set_blocked(forward, true);
        if let Some(reverse) = city.find_edge(b, a) {
            city.set_blocked(reverse, true);
        }
    }
    Ok(())
}
