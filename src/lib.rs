//! N-dimensional uniform spanning-tree maze generator, parallel dead-end-fill
//! solver, and a little-endian bit-packed on-disk codec.
//!
//! The [`Maze`] facade owns every buffer and is the crate's main entry point:
//!
//! ```no_run
//! use ndmaze::{Maze, MazeFlags};
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//!
//! let rng = Xoshiro256PlusPlus::seed_from_u64(42);
//! let mut maze = Maze::create(&[10, 10], MazeFlags::all(), rng).unwrap();
//! maze.generate();
//! maze.solve(0, 99).unwrap();
//! maze.save("maze.bin").unwrap();
//! ```

pub mod bit_vector;
pub mod codec;
pub mod error;
pub mod generator;
pub mod maze;
pub mod solver;
pub mod topology;
pub mod union_find;

pub use bit_vector::BitVector;
pub use error::{MazeError, Result};
pub use maze::{Maze, MazeFlags};
pub use topology::{Topology, Wall};
