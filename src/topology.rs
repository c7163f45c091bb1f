//! Maps an N-dimensional grid of `dims` to a flat cell index and enumerates
//! the walls between adjacent cells, in the canonical (position-outer,
//! axis-inner) order the codec depends on.

use crate::error::{MazeError, Result};

/// An unordered wall between two cells that differ by `place_value[axis]` on
/// exactly one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wall {
    pub cell1: usize,
    pub cell2: usize,
}

#[derive(Clone, Debug)]
pub struct Topology {
    dims: Vec<u32>,
    place_value: Vec<usize>,
    total_cells: usize,
    total_walls: usize,
}

impl Topology {
    pub fn new(dims: &[u32]) -> Result<Self> {
        if dims.is_empty() || dims.iter().any(|&d| d < 1) {
            return Err(MazeError::InvalidDims(dims.to_vec()));
        }

        let mut place_value = Vec::with_capacity(dims.len());
        let mut acc = 1usize;
        for &d in dims {
            place_value.push(acc);
            acc *= d as usize;
        }
        let total_cells = acc;

        let mut total_walls = 0usize;
        for i in 0..dims.len() {
            let sub_total: usize = dims
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &d)| d as usize)
                .product();
            total_walls += sub_total * (dims[i] as usize - 1);
        }

        Ok(Topology {
            dims: dims.to_vec(),
            place_value,
            total_cells,
            total_walls,
        })
    }

    pub fn dims(&self) -> &[u32] {
        &self.dims
    }

    pub fn num_axes(&self) -> usize {
        self.dims.len()
    }

    pub fn total_cells(&self) -> usize {
        self.total_cells
    }

    pub fn total_walls(&self) -> usize {
        self.total_walls
    }

    pub fn place_value(&self, axis: usize) -> usize {
        self.place_value[axis]
    }

    /// Coordinate of `position` on `axis`.
    #[inline]
    pub fn coord(&self, position: usize, axis: usize) -> usize {
        (position / self.place_value[axis]) % self.dims[axis] as usize
    }

    /// Writes the canonical wall enumeration into `out`, which must have
    /// length `total_walls`. Used both to seed the generator's lottery and to
    /// walk the codec's wall index for read/write.
    pub fn enumerate_walls(&self, out: &mut Vec<Wall>) {
        out.clear();
        out.reserve(self.total_walls);
        for position in 0..self.total_cells {
            for axis in 0..self.dims.len() {
                if self.coord(position, axis) < self.dims[axis] as usize - 1 {
                    out.push(Wall {
                        cell1: position,
                        cell2: position + self.place_value[axis],
                    });
                }
            }
        }
    }

    /// Calls `visit(wall_index, position, axis)` for every wall in canonical
    /// order without materializing the wall list. Used by the codec, which
    /// only needs to read/write one bit at a time per wall.
    pub fn for_each_canonical_wall(&self, mut visit: impl FnMut(usize, usize, usize)) {
        let mut wall_index = 0;
        for position in 0..self.total_cells {
            for axis in 0..self.dims.len() {
                if self.coord(position, axis) < self.dims[axis] as usize - 1 {
                    visit(wall_index, position, axis);
                    wall_index += 1;
                }
            }
        }
    }

    /// Recovers the axis of a wall from its cell pair.
    pub fn axis_of(&self, wall: Wall) -> usize {
        let delta = wall.cell2 - wall.cell1;
        self.place_value
            .iter()
            .position(|&pv| pv == delta)
            .expect("wall must differ on exactly one axis by its place value")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dims() {
        assert!(Topology::new(&[]).is_err());
    }

    #[test]
    fn rejects_zero_dim() {
        assert!(Topology::new(&[3, 0]).is_err());
    }

    #[test]
    fn counts_match_formula() {
        let topo = Topology::new(&[3, 3]).unwrap();
        assert_eq!(topo.total_cells(), 9);
        // rows: 3 * 2 horizontal walls per row * 3 rows = 6, plus 3 * 2 vertical = 6
        assert_eq!(topo.total_walls(), 12);
    }

    #[test]
    fn single_cell_has_no_walls() {
        let topo = Topology::new(&[1, 1]).unwrap();
        assert_eq!(topo.total_cells(), 1);
        assert_eq!(topo.total_walls(), 0);
    }

    #[test]
    fn enumeration_is_bijective_and_well_formed() {
        let topo = Topology::new(&[4, 3, 2]).unwrap();
        let mut walls = Vec::new();
        topo.enumerate_walls(&mut walls);
        assert_eq!(walls.len(), topo.total_walls());

        let mut seen = std::collections::HashSet::new();
        for w in &walls {
            assert!(w.cell2 > w.cell1);
            let delta = w.cell2 - w.cell1;
            assert!((0..topo.num_axes()).any(|a| topo.place_value(a) == delta));
            assert!(seen.insert((w.cell1, w.cell2)));
        }
    }

    #[test]
    fn for_each_canonical_wall_matches_enumerate_walls() {
        let topo = Topology::new(&[3, 3]).unwrap();
        let mut walls = Vec::new();
        topo.enumerate_walls(&mut walls);

        let mut visited = Vec::new();
        topo.for_each_canonical_wall(|idx, position, axis| {
            visited.push((idx, position, axis));
        });

        assert_eq!(visited.len(), walls.len());
        for (expected_idx, (idx, position, axis)) in visited.into_iter().enumerate() {
            assert_eq!(idx, expected_idx);
            let w = walls[idx];
            assert_eq!(w.cell1, position);
            assert_eq!(w.cell2, position + topo.place_value(axis));
        }
    }
}
