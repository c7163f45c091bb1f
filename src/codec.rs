//! Little-endian, bit-packed on-disk format for a maze + its solution.
//!
//! ```text
//! uint32   dims_length
//! uint32[dims_length]  dims
//! uint8[ceil(total_walls/8)]  maze_bits       // bit k = wall k open?
//! uint32   solution_length
//! uint8[ceil(total_walls/8)]  solution_bits   // bit k = wall k on solution?
//! ```
//!
//! Ported from `original_source/savemazeworker.h` / `openmazeworker.h`, which
//! memory-map the file via Qt; this crate has no other use for an mmap
//! dependency, so plain buffered reads/writes are used instead.

use std::io::{Read, Write};
use std::path::Path;

use crate::bit_vector::BitVector;
use crate::error::{MazeError, Result};
use crate::topology::Topology;

/// The parsed, not-yet-applied contents of a `.maze` file.
pub struct DecodedMaze {
    pub dims: Vec<u32>,
    pub maze_bits: BitVector,
    pub solution_length: u32,
    pub solution_bits: BitVector,
}

fn io_err(path: &Path, source: std::io::Error) -> MazeError {
    MazeError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn invalid(path: &Path, reason: impl Into<String>) -> MazeError {
    MazeError::InvalidFile {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Serializes `dims` + `halls` + `solution_length` + `solution` to `path`.
pub fn write(
    path: impl AsRef<Path>,
    topo: &Topology,
    halls: &[BitVector],
    solution_length: u32,
    solution: &[BitVector],
) -> Result<()> {
    let path: &Path = path.as_ref();
    let mut file = std::fs::File::create(path).map_err(|e| io_err(path, e))?;

    let dims = topo.dims();
    file.write_all(&(dims.len() as u32).to_le_bytes())
        .map_err(|e| io_err(path, e))?;
    for &d in dims {
        file.write_all(&d.to_le_bytes()).map_err(|e| io_err(path, e))?;
    }

    let maze_bits = pack_walls(topo, halls);
    file.write_all(maze_bits.as_bytes())
        .map_err(|e| io_err(path, e))?;

    file.write_all(&solution_length.to_le_bytes())
        .map_err(|e| io_err(path, e))?;

    let solution_bits = pack_walls(topo, solution);
    file.write_all(solution_bits.as_bytes())
        .map_err(|e| io_err(path, e))?;

    Ok(())
}

/// Walks the canonical wall order, packing one bit per wall from the given
/// per-axis bitmaps (`halls` or `solution`).
fn pack_walls(topo: &Topology, bitmaps: &[BitVector]) -> BitVector {
    let mut packed = BitVector::new(topo.total_walls());
    topo.for_each_canonical_wall(|wall_index, position, axis| {
        if bitmaps[axis].get(position) {
            packed.set(wall_index);
        }
    });
    packed
}

/// Reads and validates a `.maze` file, returning its parsed contents without
/// touching any in-memory `Maze`. The caller decides whether to reuse an
/// existing maze or allocate a fresh one based on `dims`.
pub fn read(path: impl AsRef<Path>) -> Result<DecodedMaze> {
    let path: &Path = path.as_ref();
    let mut file = std::fs::File::open(path).map_err(|e| io_err(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| io_err(path, e))?;

    read_bytes(path, &bytes)
}

fn read_bytes(path: &Path, bytes: &[u8]) -> Result<DecodedMaze> {
    if bytes.len() < 4 {
        return Err(invalid(path, "truncated before dims_length"));
    }
    let dims_length = u32::from_le_bytes(bytes[0..4].try_into().unwrap()) as usize;

    let header_len = 4 * (dims_length + 1);
    if bytes.len() < header_len {
        return Err(invalid(path, "truncated before dims"));
    }

    let mut dims = Vec::with_capacity(dims_length);
    for i in 0..dims_length {
        let start = 4 * (i + 1);
        dims.push(u32::from_le_bytes(bytes[start..start + 4].try_into().unwrap()));
    }

    let topo = Topology::new(&dims).map_err(|_| invalid(path, "dims contains a zero entry"))?;
    let bitstream_len = topo.total_walls() / 8 + usize::from(topo.total_walls() % 8 != 0);

    let maze_bits_start = header_len;
    let solution_length_start = maze_bits_start + bitstream_len;
    let solution_bits_start = solution_length_start + 4;
    let total_len = solution_bits_start + bitstream_len;

    if bytes.len() < total_len {
        return Err(invalid(path, "truncated before end of solution bitstream"));
    }

    let maze_bits = BitVector::from_bytes(
        topo.total_walls(),
        bytes[maze_bits_start..solution_length_start].to_vec(),
    );
    let solution_length = u32::from_le_bytes(
        bytes[solution_length_start..solution_bits_start]
            .try_into()
            .unwrap(),
    );
    let solution_bits = BitVector::from_bytes(
        topo.total_walls(),
        bytes[solution_bits_start..total_len].to_vec(),
    );

    Ok(DecodedMaze {
        dims,
        maze_bits,
        solution_length,
        solution_bits,
    })
}

/// Applies a decoded file's bitstreams onto per-axis `halls`/`solution`
/// bitmaps, in canonical order.
pub fn unpack_into(
    topo: &Topology,
    decoded: &DecodedMaze,
    halls: &mut [BitVector],
    solution: &mut [BitVector],
) {
    halls.iter_mut().for_each(BitVector::reset);
    solution.iter_mut().for_each(BitVector::reset);

    topo.for_each_canonical_wall(|wall_index, position, axis| {
        if decoded.maze_bits.get(wall_index) {
            halls[axis].set(position);
        }
        if decoded.solution_bits.get(wall_index) {
            solution[axis].set(position);
        }
    });
}

/// `4 * (dims_length + 2) + 2 * ceil(total_walls / 8)`.
pub fn expected_file_size(topo: &Topology) -> usize {
    let bitstream_len = topo.total_walls() / 8 + usize::from(topo.total_walls() % 8 != 0);
    4 * (topo.num_axes() + 2) + 2 * bitstream_len
}
