//! Randomised Kruskal spanning-tree generator.
//!
//! Ported from the knocked-out/extent two-pointer lottery shuffle in
//! `Maze_generate` (the reference C implementation), with the biased
//! `random() / (RAND_MAX + 1.0)` float draw replaced by `Rng::gen_range`,
//! which is unbiased over the shrinking `[knocked_out, extent)` range.

use rand::Rng;
use tracing::debug;

use crate::bit_vector::BitVector;
use crate::topology::{Topology, Wall};
use crate::union_find::UnionFind;

/// Runs one generation pass: reseeds the lottery in canonical order, unions
/// cells via Kruskal over a shuffled-by-rejection draw, and projects the
/// surviving walls onto `halls`. When `neighbor_count` is `Some`, each
/// accepted wall also increments the degree of its two endpoints.
pub fn generate(
    topo: &Topology,
    rng: &mut impl Rng,
    union_find: &mut UnionFind,
    lottery: &mut Vec<Wall>,
    halls: &mut [BitVector],
    neighbor_count: Option<&mut [u8]>,
) -> usize {
    topo.enumerate_walls(lottery);
    union_find.reset(topo.total_cells());

    if let Some(counts) = &neighbor_count {
        debug_assert_eq!(counts.len(), topo.total_cells());
    }
    if let Some(counts) = neighbor_count {
        counts.iter_mut().for_each(|c| *c = 0);
        run_kruskal(topo, rng, union_find, lottery, Some(counts))
    } else {
        run_kruskal(topo, rng, union_find, lottery, None)
    };

    let knocked_out = topo.total_cells().saturating_sub(1);
    project(topo, &lottery[..knocked_out], halls);

    debug!(
        total_cells = topo.total_cells(),
        total_walls = topo.total_walls(),
        knocked_out,
        "generated spanning tree"
    );

    knocked_out
}

fn run_kruskal(
    topo: &Topology,
    rng: &mut impl Rng,
    union_find: &mut UnionFind,
    lottery: &mut [Wall],
    mut neighbor_count: Option<&mut [u8]>,
) {
    let total_cells = topo.total_cells();
    if total_cells <= 1 {
        return;
    }

    let target = total_cells - 1;
    let mut knocked_out = 0usize;
    let mut extent = lottery.len();

    while knocked_out < target {
        let r = rng.gen_range(knocked_out..extent);
        let wall = lottery[r];
        let root1 = union_find.find(wall.cell1);
        let root2 = union_find.find(wall.cell2);

        if root1 != root2 {
            union_find.union(root1, root2);
            if let Some(counts) = neighbor_count.as_deref_mut() {
                counts[wall.cell1] += 1;
                counts[wall.cell2] += 1;
            }
            lottery.swap(r, knocked_out);
            knocked_out += 1;
        } else {
            lottery[r] = lottery[extent - 1];
            extent -= 1;
        }
    }
}

/// Clears `halls` and sets one bit per surviving wall, per `Topology::axis_of`.
pub(crate) fn project(topo: &Topology, walls: &[Wall], halls: &mut [BitVector]) {
    halls.iter_mut().for_each(BitVector::reset);
    for &wall in walls {
        let axis = topo.axis_of(wall);
        halls[axis].set(wall.cell1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn fresh_halls(topo: &Topology) -> Vec<BitVector> {
        (0..topo.num_axes())
            .map(|_| BitVector::new(topo.total_cells()))
            .collect()
    }

    #[test]
    fn spanning_tree_has_exactly_n_minus_one_edges() {
        let topo = Topology::new(&[4, 5]).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let mut uf = UnionFind::new(topo.total_cells());
        let mut lottery = Vec::new();
        let mut halls = fresh_halls(&topo);

        generate(&topo, &mut rng, &mut uf, &mut lottery, &mut halls, None);

        let total_open: usize = halls.iter().map(BitVector::count_ones).sum();
        assert_eq!(total_open, topo.total_cells() - 1);
    }

    #[test]
    fn spanning_tree_is_connected() {
        let topo = Topology::new(&[4, 4]).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
        let mut uf = UnionFind::new(topo.total_cells());
        let mut lottery = Vec::new();
        let mut halls = fresh_halls(&topo);

        generate(&topo, &mut rng, &mut uf, &mut lottery, &mut halls, None);

        // Union-find over the open halls should merge everything into one set.
        let mut check = UnionFind::new(topo.total_cells());
        for axis in 0..topo.num_axes() {
            for position in 0..topo.total_cells() {
                if topo.coord(position, axis) < topo.dims()[axis] as usize - 1
                    && halls[axis].get(position)
                {
                    let a = check.find(position);
                    let b = check.find(position + topo.place_value(axis));
                    if a != b {
                        check.union(a, b);
                    }
                }
            }
        }
        let root = check.find(0);
        for c in 1..topo.total_cells() {
            assert_eq!(check.find(c), root);
        }
    }

    #[test]
    fn neighbor_count_matches_open_halls() {
        let topo = Topology::new(&[5, 5]).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let mut uf = UnionFind::new(topo.total_cells());
        let mut lottery = Vec::new();
        let mut halls = fresh_halls(&topo);
        let mut counts = vec![0u8; topo.total_cells()];

        generate(
            &topo,
            &mut rng,
            &mut uf,
            &mut lottery,
            &mut halls,
            Some(&mut counts),
        );

        let mut expected = vec![0u8; topo.total_cells()];
        for axis in 0..topo.num_axes() {
            for position in 0..topo.total_cells() {
                if topo.coord(position, axis) < topo.dims()[axis] as usize - 1
                    && halls[axis].get(position)
                {
                    expected[position] += 1;
                    expected[position + topo.place_value(axis)] += 1;
                }
            }
        }
        assert_eq!(counts, expected);
    }

    #[test]
    fn single_cell_grid_generates_no_walls() {
        let topo = Topology::new(&[1, 1]).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let mut uf = UnionFind::new(topo.total_cells());
        let mut lottery = Vec::new();
        let mut halls = fresh_halls(&topo);

        let knocked_out = generate(&topo, &mut rng, &mut uf, &mut lottery, &mut halls, None);
        assert_eq!(knocked_out, 0);
        assert!(halls.iter().all(|h| h.count_ones() == 0));
    }
}
