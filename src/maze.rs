//! Maze facade: owns every buffer and exposes create/generate/solve/save/load.

use std::path::Path;

use rand::RngCore;
use tracing::info;

use crate::bit_vector::BitVector;
use crate::codec;
use crate::error::{MazeError, Result};
use crate::generator;
use crate::solver;
use crate::topology::{Topology, Wall};
use crate::union_find::UnionFind;

/// Capability flags controlling which buffers `Maze::create` allocates.
///
/// `output_solution` is a prerequisite for `solve`: the degree array is only
/// maintained when it is set. `multiple_solves` additionally allocates the
/// degree-shadow buffer so `solve` can be called more than once.
#[derive(Clone, Copy, Debug, Default)]
pub struct MazeFlags {
    pub output_maze: bool,
    pub output_solution: bool,
    pub multiple_solves: bool,
}

impl MazeFlags {
    pub fn all() -> Self {
        MazeFlags {
            output_maze: true,
            output_solution: true,
            multiple_solves: true,
        }
    }
}

const MIN_CORES: usize = 1;
const MAX_CORES: usize = 1024;

pub struct Maze {
    topo: Topology,
    flags: MazeFlags,
    rng: Box<dyn RngCore>,
    cores: usize,

    union_find: UnionFind,
    lottery_scratch: Vec<Wall>,
    tree_wall_count: usize,

    neighbor_count: Option<Vec<u8>>,
    neighbor_count_copy: Option<Vec<u8>>,
    needs_neighbor_count_refreshed: bool,

    halls: Vec<BitVector>,
    solution: Vec<BitVector>,

    solution_length: usize,
}

impl Maze {
    /// Allocates a maze over `dims` with the given capability flags and RNG.
    /// The RNG is injected rather than clock-seeded so tests are reproducible.
    pub fn create(dims: &[u32], flags: MazeFlags, rng: impl RngCore + 'static) -> Result<Self> {
        let topo = Topology::new(dims)?;
        let total_cells = topo.total_cells();
        let num_axes = topo.num_axes();

        let neighbor_count = flags.output_solution.then(|| vec![0u8; total_cells]);
        let neighbor_count_copy = flags.multiple_solves.then(|| vec![0u8; total_cells]);
        let halls = flags
            .output_maze
            .then(|| (0..num_axes).map(|_| BitVector::new(total_cells)).collect())
            .unwrap_or_default();
        let solution = flags
            .output_solution
            .then(|| (0..num_axes).map(|_| BitVector::new(total_cells)).collect())
            .unwrap_or_default();

        info!(?dims, total_cells, "created maze");

        Ok(Maze {
            union_find: UnionFind::new(total_cells),
            topo,
            flags,
            rng: Box::new(rng),
            cores: 1,
            lottery_scratch: Vec::new(),
            tree_wall_count: 0,
            neighbor_count,
            neighbor_count_copy,
            needs_neighbor_count_refreshed: false,
            halls,
            solution,
            solution_length: 0,
        })
    }

    /// Clamps `n` to `[1, 1024]` and ignores it otherwise, per the misuse
    /// taxonomy ("set_cores outside [1,1024] is ignored").
    pub fn set_cores(&mut self, n: usize) {
        self.cores = n.clamp(MIN_CORES, MAX_CORES);
    }

    pub fn dims(&self) -> &[u32] {
        self.topo.dims()
    }

    pub fn total_cells(&self) -> usize {
        self.topo.total_cells()
    }

    pub fn total_walls(&self) -> usize {
        self.topo.total_walls()
    }

    pub fn solution_length(&self) -> usize {
        self.solution_length
    }

    pub fn halls(&self, axis: usize) -> &BitVector {
        &self.halls[axis]
    }

    pub fn solution(&self, axis: usize) -> &BitVector {
        &self.solution[axis]
    }

    /// Reseeds and rewrites the spanning tree. May be called repeatedly; each
    /// call fully overwrites `halls` and, if present, `neighbor_count`.
    pub fn generate(&mut self) {
        let counts = self.neighbor_count.as_deref_mut();
        let mut scratch_halls: Vec<BitVector> = if self.flags.output_maze {
            std::mem::take(&mut self.halls)
        } else {
            (0..self.topo.num_axes())
                .map(|_| BitVector::new(self.topo.total_cells()))
                .collect()
        };

        self.tree_wall_count = generator::generate(
            &self.topo,
            &mut self.rng,
            &mut self.union_find,
            &mut self.lottery_scratch,
            &mut scratch_halls,
            counts,
        );

        if self.flags.output_maze {
            self.halls = scratch_halls;
        }
        self.needs_neighbor_count_refreshed = false;
    }

    /// Reduces the spanning tree to the unique `start -> end` path.
    ///
    /// `start == end` is accepted and produces the empty-path solution
    /// (`solutionLength == 0`) rather than an error: a single-cell maze has
    /// no other valid call, and the empty path is always a well-defined
    /// answer regardless of maze size.
    ///
    /// Without `multiple_solves`, a second call fails with
    /// `RepeatSolveNotEnabled` and leaves all state untouched.
    pub fn solve(&mut self, start: usize, end: usize) -> Result<()> {
        if !self.flags.output_solution {
            return Err(MazeError::SolvingNotEnabled);
        }
        let total_cells = self.topo.total_cells();
        if start >= total_cells || end >= total_cells {
            return Err(MazeError::EndpointOutOfRange {
                start,
                end,
                total_cells,
            });
        }
        if self.needs_neighbor_count_refreshed && !self.flags.multiple_solves {
            return Err(MazeError::RepeatSolveNotEnabled);
        }

        if start == end {
            self.solution_length = 0;
            self.solution.iter_mut().for_each(BitVector::reset);
            self.needs_neighbor_count_refreshed = true;
            info!(start, end, solution_length = 0, "solved maze (start == end)");
            return Ok(());
        }

        let degree = self.neighbor_count.as_mut().expect("checked above");

        if self.flags.multiple_solves {
            let copy = self
                .neighbor_count_copy
                .as_mut()
                .expect("multiple_solves allocates the shadow copy");
            if self.needs_neighbor_count_refreshed {
                degree.copy_from_slice(copy);
            } else {
                copy.copy_from_slice(degree);
            }
        }

        let tree_walls =
            solver::canonical_order(&self.topo, &self.lottery_scratch[..self.tree_wall_count]);
        let solution_walls = solver::solve(&tree_walls, degree, start, end, self.cores);

        self.solution_length = solution_walls.len();
        self.needs_neighbor_count_refreshed = true;

        if self.flags.output_solution {
            solver::project(&self.topo, &solution_walls, &mut self.solution);
        }

        info!(start, end, solution_length = self.solution_length, "solved maze");

        Ok(())
    }

    /// Writes `dims`, `halls`, `solution_length`, and `solution` to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        codec::write(
            path,
            &self.topo,
            &self.halls,
            self.solution_length as u32,
            &self.solution,
        )
    }

    /// Loads a `.maze` file, reusing `self` if its topology already matches
    /// and reallocating (with full solving capability) otherwise. `rng` seeds
    /// the reallocated maze if one is needed; it is unused when the existing
    /// maze's topology already matches the file.
    pub fn load(&mut self, path: impl AsRef<Path>, rng: impl RngCore + 'static) -> Result<()> {
        let decoded = codec::read(path)?;
        if decoded.dims != self.topo.dims() {
            *self = Maze::create(&decoded.dims, MazeFlags::all(), rng)?;
        }
        codec::unpack_into(&self.topo, &decoded, &mut self.halls, &mut self.solution);
        self.solution_length = decoded.solution_length as usize;
        self.sync_solver_state_from_halls();
        Ok(())
    }

    /// Loads a `.maze` file into a freshly allocated maze with full solving
    /// capability, the way a standalone viewer would.
    pub fn load_fresh(path: impl AsRef<Path>, rng: impl RngCore + 'static) -> Result<Self> {
        let decoded = codec::read(&path)?;
        let mut maze = Maze::create(&decoded.dims, MazeFlags::all(), rng)?;
        codec::unpack_into(&maze.topo, &decoded, &mut maze.halls, &mut maze.solution);
        maze.solution_length = decoded.solution_length as usize;
        maze.sync_solver_state_from_halls();
        Ok(maze)
    }

    /// The on-disk format carries no degree array, only `halls`/`solution`
    /// bitmaps. After a `load`, the tree-edge list and `neighbor_count` (both
    /// needed by a subsequent `solve`) are rebuilt from `halls` rather than
    /// inherited from whatever `generate` last produced.
    fn sync_solver_state_from_halls(&mut self) {
        let tree_walls = solver::canonical_tree_walls(&self.topo, &self.halls);
        self.tree_wall_count = tree_walls.len();
        self.lottery_scratch = tree_walls;

        if let Some(degree) = self.neighbor_count.as_mut() {
            degree.iter_mut().for_each(|d| *d = 0);
            for axis in 0..self.topo.num_axes() {
                for position in 0..self.topo.total_cells() {
                    if self.topo.coord(position, axis) < self.topo.dims()[axis] as usize - 1
                        && self.halls[axis].get(position)
                    {
                        degree[position] += 1;
                        degree[position + self.topo.place_value(axis)] += 1;
                    }
                }
            }
        }
        self.needs_neighbor_count_refreshed = false;
    }
}
