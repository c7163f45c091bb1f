//! Parallel dead-end-fill solver.
//!
//! Repeatedly removes walls incident to a degree-1 non-endpoint cell until
//! none remain; on a tree this converges to the unique simple path between
//! `start` and `end`. The parallel variant partitions the (already
//! canonically-sorted) wall list across `cores` rayon workers that mutate a
//! shared `AtomicU8` degree array, then runs a single-threaded reconciliation
//! pass over the compacted survivors to finish any path that crossed a slice
//! boundary — see `original_source/Maze.c`'s `Maze_solve` for the
//! single-threaded shape this generalizes.

use std::sync::atomic::{AtomicU8, Ordering};

use rayon::prelude::*;
use tracing::debug;

use crate::bit_vector::BitVector;
use crate::topology::{Topology, Wall};

/// Rebuilds the canonical-order wall list of every open hall, i.e. the
/// spanning tree produced by `generate`. This is the "rewrite the lottery in
/// canonical order" pre-step described for the parallel solver, and doubles
/// as the single-threaded solver's input. Used by tests and by any caller
/// that only has the `halls` bitmaps handy.
pub fn canonical_tree_walls(topo: &Topology, halls: &[BitVector]) -> Vec<Wall> {
    let mut walls = Vec::with_capacity(topo.total_cells().saturating_sub(1));
    topo.for_each_canonical_wall(|_, position, axis| {
        if halls[axis].get(position) {
            walls.push(Wall {
                cell1: position,
                cell2: position + topo.place_value(axis),
            });
        }
    });
    walls
}

/// Sorts an arbitrary tree-wall list into canonical (position-outer,
/// axis-inner) order. Used by the facade, which keeps the tree edges the
/// generator produced directly (not reconstructed from `halls`, since
/// `halls` may not even be allocated when `MazeFlags::output_maze` is off).
pub fn canonical_order(topo: &Topology, walls: &[Wall]) -> Vec<Wall> {
    let mut sorted = walls.to_vec();
    sorted.sort_by_key(|w| (w.cell1, topo.axis_of(*w)));
    sorted
}

/// Runs dead-end fill over `tree_walls`, using `cores` rayon workers.
/// `degree` must hold the current open-hall degree of every cell (the
/// generator's `neighbor_count`, or its restored shadow copy). Returns the
/// surviving solution walls.
pub fn solve(
    tree_walls: &[Wall],
    degree: &[u8],
    start: usize,
    end: usize,
    cores: usize,
) -> Vec<Wall> {
    let atomic_degree: Vec<AtomicU8> = degree.iter().map(|&d| AtomicU8::new(d)).collect();
    let cores = cores.clamp(1, tree_walls.len().max(1));

    let mut lottery = tree_walls.to_vec();
    let bounds = slice_bounds(lottery.len(), cores);

    let local_counts: Vec<usize> = {
        let slices = split_into_slices(&mut lottery, &bounds);
        slices
            .into_par_iter()
            .map(|slice| dead_end_fill(slice, &atomic_degree, start, end))
            .collect()
    };

    let mut compacted = Vec::with_capacity(local_counts.iter().sum());
    for (&(slice_start, _), &kept) in bounds.iter().zip(local_counts.iter()) {
        compacted.extend_from_slice(&lottery[slice_start..slice_start + kept]);
    }

    let kept = dead_end_fill(&mut compacted, &atomic_degree, start, end);
    compacted.truncate(kept);

    debug!(
        cores,
        solution_length = compacted.len(),
        "solved maze via parallel dead-end fill"
    );

    compacted
}

/// Single-threaded convenience wrapper (`cores = 1`), kept separate so tests
/// and callers that don't care about parallelism can avoid naming a core
/// count.
pub fn solve_single_threaded(
    tree_walls: &[Wall],
    degree: &[u8],
    start: usize,
    end: usize,
) -> Vec<Wall> {
    solve(tree_walls, degree, start, end, 1)
}

fn slice_bounds(len: usize, cores: usize) -> Vec<(usize, usize)> {
    (0..cores)
        .map(|i| (i * len / cores, (i + 1) * len / cores))
        .collect()
}

fn split_into_slices<'a>(data: &'a mut [Wall], bounds: &[(usize, usize)]) -> Vec<&'a mut [Wall]> {
    let mut rest = data;
    let mut out = Vec::with_capacity(bounds.len());
    for &(s, e) in bounds {
        let len = e - s;
        let (chunk, remainder) = rest.split_at_mut(len);
        out.push(chunk);
        rest = remainder;
    }
    out
}

/// Removes walls incident to a degree-1 non-endpoint cell until no more can
/// be removed, restricted to `lottery`. Returns the number of walls kept;
/// kept walls occupy `lottery[..kept]`. Does not advance past a removed slot
/// (a fresh wall occupies it after the swap), matching the reference.
fn dead_end_fill(lottery: &mut [Wall], degree: &[AtomicU8], start: usize, end: usize) -> usize {
    let mut knocked_out = lottery.len();

    loop {
        let mut filled = false;
        let mut i = 0;
        while i < knocked_out {
            let wall = lottery[i];
            let d1 = degree[wall.cell1].load(Ordering::SeqCst);
            let d2 = degree[wall.cell2].load(Ordering::SeqCst);
            let dead1 = d1 == 1 && wall.cell1 != start && wall.cell1 != end;
            let dead2 = d2 == 1 && wall.cell2 != start && wall.cell2 != end;

            if dead1 || dead2 {
                degree[wall.cell1].fetch_sub(1, Ordering::SeqCst);
                degree[wall.cell2].fetch_sub(1, Ordering::SeqCst);
                knocked_out -= 1;
                lottery.swap(i, knocked_out);
                filled = true;
            } else {
                i += 1;
            }
        }
        if !filled {
            break;
        }
    }

    knocked_out
}

/// Clears `solution` and sets one bit per surviving wall.
pub fn project(topo: &Topology, walls: &[Wall], solution: &mut [BitVector]) {
    solution.iter_mut().for_each(BitVector::reset);
    for &wall in walls {
        let axis = topo.axis_of(wall);
        solution[axis].set(wall.cell1);
    }
}
