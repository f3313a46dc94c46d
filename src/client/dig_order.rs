// Copyright (c) 2021 Andrew Gazelka - All Rights Reserved.
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Turns an excavation [`Volume`] into the order its blocks are broken in.
//!
//! Every layer is dug top down. A layer first cuts its part of a switchback
//! staircase running along the two columns just past the footprint
//! (`x = width` and `x = width + 1`), then sweeps the `width x depth`
//! footprint column by column, alternating direction so the agent never has
//! to walk back across a column it just cleared.
//!
//! Coordinates are computed relative to the anchor with layer `i` at `y = -i`
//! and translated at the very end.

use indexmap::IndexSet;
use interfaces::types::{BlockLocation, Volume};
use itertools::Either;
use smallvec::SmallVec;

use crate::error::{Error, Res};

/// The blocks to break, front first
pub type DigOrder = Vec<BlockLocation>;

/// Plan the dig order of `volume`.
///
/// Staircase cells are never emitted twice. They also never overlap the
/// footprint, so every location in the result is unique.
pub fn plan(volume: &Volume) -> Res<DigOrder> {
    let &Volume {
        anchor,
        width,
        height,
        depth,
    } = volume;

    if !volume.is_valid() {
        return Err(Error::InvalidVolume {
            width,
            height,
            depth,
        });
    }

    let staircase = Staircase::new(width, height, depth);

    let capacity = usize::try_from(volume.footprint_volume()).unwrap_or_default();
    let mut order = Vec::with_capacity(capacity);
    let mut stairs = IndexSet::new();

    for layer in 0..height {
        let before = stairs.len();
        stairs.extend(staircase.layer_cells(layer));

        let new_stairs = stairs.iter().skip(before).copied();
        let footprint = sweep(width, depth, -layer);

        order.extend(new_stairs.chain(footprint).map(|loc| loc + anchor));
    }

    Ok(order)
}

/// Boustrophedon sweep of one layer: even columns run +z, odd columns run -z
fn sweep(width: i32, depth: i32, y: i32) -> impl Iterator<Item = BlockLocation> {
    (0..width).flat_map(move |x| {
        let zs = if x % 2 == 0 {
            Either::Left(0..depth)
        } else {
            Either::Right((0..depth).rev())
        };
        zs.map(move |z| BlockLocation::new(x, y, z))
    })
}

/// The switchback staircase beside the footprint.
///
/// The walkway descends one block per layer. It runs `+z` along the front
/// column (`x = width`) for `depth` layers, steps sideways into the back
/// column (`x = width + 1`), runs `-z` for `depth` layers, steps back and so
/// on. Each run of `depth` layers is a cycle and the position inside it is the
/// lane.
#[derive(Copy, Clone, Debug)]
pub struct Staircase {
    width: i32,
    height: i32,
    depth: i32,
}

impl Staircase {
    /// How many blocks over a step have to be clear for a two block tall
    /// player to walk down onto it
    const CLEARANCE: i32 = 2;

    pub const fn new(width: i32, height: i32, depth: i32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    const fn cycle(&self, layer: i32) -> i32 {
        layer / self.depth
    }

    const fn lane(&self, layer: i32) -> i32 {
        layer % self.depth
    }

    /// The column the walkway runs along in the given layer
    const fn active_x(&self, layer: i32) -> i32 {
        if self.cycle(layer) % 2 == 0 {
            self.width
        } else {
            self.width + 1
        }
    }

    const fn opposite_x(&self, layer: i32) -> i32 {
        if self.cycle(layer) % 2 == 0 {
            self.width + 1
        } else {
            self.width
        }
    }

    /// The block the player stands in (feet) after descending to `layer`
    pub const fn step(&self, layer: i32) -> BlockLocation {
        let lane = self.lane(layer);
        let z = if self.cycle(layer) % 2 == 0 {
            lane
        } else {
            self.depth - lane - 1
        };
        BlockLocation::new(self.active_x(layer), -layer, z)
    }

    /// Every staircase block cut while digging `layer`, above-anchor cells
    /// removed (the surface is open).
    ///
    /// - lane 0 of the first cycle: the step only, it is entered from the
    ///   surface
    /// - lane 0 of a later cycle: the step and the block over it. The walkway
    ///   came from the other column and the block two over was notched out
    ///   by the previous layer.
    /// - any other lane: the step and both blocks over it
    /// - the last lane of a cycle, unless it is the bottom layer: the two
    ///   blocks over the next step in the opposite column (level with this
    ///   step and one up), so the player can turn into it without hitting
    ///   the wall. Nothing higher is cut there: with `depth == 2` the block
    ///   above is the floor of an earlier step.
    ///
    /// When `depth == 1` every lane is both first and last, so both of the
    /// lane 0 and last lane rules apply. The two columns then form an open
    /// shaft rather than a walkable staircase.
    pub fn layer_cells(&self, layer: i32) -> SmallVec<[BlockLocation; 5]> {
        let step = self.step(layer);
        let lane = self.lane(layer);

        let forward = match lane {
            0 if self.cycle(layer) == 0 => 0,
            0 => 1,
            _ => Self::CLEARANCE,
        };

        let mut cells: SmallVec<[BlockLocation; 5]> = SmallVec::new();
        cells.push(step);
        cells.extend((1..=forward).map(|dy| step.add_y(dy)));

        let turns = lane == self.depth - 1 && layer + 1 < self.height;
        if turns {
            let notch = BlockLocation::new(self.opposite_x(layer), step.y, step.z);
            cells.extend((0..Self::CLEARANCE).map(|dy| notch.add_y(dy)));
        }

        cells.retain(|loc| loc.y <= 0);
        cells
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use assert_matches::assert_matches;
    use interfaces::types::{BlockLocation, Volume};
    use more_asserts::*;

    use crate::{
        client::dig_order::{plan, Staircase},
        error::Error,
    };

    fn volumes() -> impl Iterator<Item = Volume> {
        let anchor = BlockLocation::new(-7, 64, 12);
        (1..=4).flat_map(move |width| {
            (1..=9).flat_map(move |height| {
                (1..=5).map(move |depth| Volume::new(anchor, width, height, depth))
            })
        })
    }

    fn in_footprint(volume: &Volume, loc: BlockLocation) -> bool {
        let rel = loc - volume.anchor;
        (0..volume.width).contains(&rel.x) && (0..volume.depth).contains(&rel.z)
    }

    #[test]
    fn rejects_non_positive_extents() {
        let anchor = BlockLocation::default();
        for (w, h, d) in [(0, 1, 1), (1, 0, 1), (1, 1, 0), (-2, 3, 3)] {
            let res = plan(&Volume::new(anchor, w, h, d));
            assert_matches!(
                res,
                Err(Error::InvalidVolume { width, height, depth }) if (width, height, depth) == (w, h, d)
            );
        }
    }

    #[test]
    fn small_run() {
        let volume = Volume::new(BlockLocation::default(), 2, 1, 2);
        let order = plan(&volume).unwrap();

        assert_eq!(
            order,
            vec![
                BlockLocation::new(2, 0, 0),
                BlockLocation::new(0, 0, 0),
                BlockLocation::new(0, 0, 1),
                BlockLocation::new(1, 0, 1),
                BlockLocation::new(1, 0, 0),
            ]
        );
    }

    #[test]
    fn within_bounds() {
        for volume in volumes() {
            let Volume {
                anchor,
                width,
                height,
                depth,
            } = volume;

            for loc in plan(&volume).unwrap() {
                assert_ge!(loc.x, anchor.x);
                assert_le!(loc.x, anchor.x + width + 1);
                assert_ge!(loc.y, anchor.y - height);
                assert_le!(loc.y, anchor.y);
                assert_ge!(loc.z, anchor.z);
                assert_le!(loc.z, anchor.z + depth - 1);
            }
        }
    }

    #[test]
    fn deterministic() {
        for volume in volumes() {
            assert_eq!(plan(&volume).unwrap(), plan(&volume).unwrap());
        }
    }

    #[test]
    fn footprint_swept_once() {
        for volume in volumes() {
            let order = plan(&volume).unwrap();

            let mut counts = HashMap::new();
            for &loc in &order {
                *counts.entry(loc).or_insert(0) += 1;
            }

            // nothing is emitted twice, staircase included
            assert!(counts.values().all(|&count| count == 1));

            for layer in 0..volume.height {
                for x in 0..volume.width {
                    for z in 0..volume.depth {
                        let loc = volume.anchor + BlockLocation::new(x, -layer, z);
                        assert!(counts.contains_key(&loc), "{loc} missing from {volume:?}");
                    }
                }
            }

            let footprint = order.iter().filter(|&&loc| in_footprint(&volume, loc)).count();
            assert_eq!(footprint as u64, volume.footprint_volume());

            // each layer adds at most 5 staircase blocks
            let stairs = order.len() - footprint;
            assert_ge!(stairs, volume.height as usize);
            assert_le!(stairs, 5 * volume.height as usize);
        }
    }

    #[test]
    fn layers_dug_top_down() {
        for volume in volumes() {
            let order = plan(&volume).unwrap();
            let footprint_ys: Vec<_> = order
                .iter()
                .filter(|&&loc| in_footprint(&volume, loc))
                .map(|loc| loc.y)
                .collect();

            assert!(footprint_ys.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn sweep_is_boustrophedon() {
        let volume = Volume::new(BlockLocation::default(), 3, 1, 3);
        let sweep: Vec<_> = plan(&volume)
            .unwrap()
            .into_iter()
            .filter(|&loc| in_footprint(&volume, loc))
            .map(|loc| (loc.x, loc.z))
            .collect();

        assert_eq!(
            sweep,
            vec![
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 2),
                (1, 1),
                (1, 0),
                (2, 0),
                (2, 1),
                (2, 2)
            ]
        );
    }

    #[test]
    fn steps_are_adjacent() {
        for volume in volumes() {
            let stairs = Staircase::new(volume.width, volume.height, volume.depth);

            for layer in 1..volume.height {
                let from = stairs.step(layer - 1);
                let to = stairs.step(layer);

                assert_eq!(from.y - to.y, 1);

                // one horizontal block over, in either x (switchback) or z (run)
                let (dx, _, dz) = from.abs_dif(to);
                assert_eq!(dx + dz, 1, "{from} -> {to} in {volume:?}");
            }
        }
    }

    #[test]
    fn switchback_reverses() {
        let stairs = Staircase::new(2, 8, 3);
        let steps: Vec<_> = (0..8).map(|layer| stairs.step(layer)).collect();

        assert_eq!(
            steps,
            vec![
                BlockLocation::new(2, 0, 0),
                BlockLocation::new(2, -1, 1),
                BlockLocation::new(2, -2, 2),
                BlockLocation::new(3, -3, 2),
                BlockLocation::new(3, -4, 1),
                BlockLocation::new(3, -5, 0),
                BlockLocation::new(2, -6, 0),
                BlockLocation::new(2, -7, 1),
            ]
        );
    }

    /// walking from one step down to the next needs the destination, the block
    /// over it (head) and the block over that (head while still on the upper
    /// step) to be clear
    #[test]
    fn staircase_is_walkable() {
        for volume in volumes() {
            let stairs = Staircase::new(volume.width, volume.height, volume.depth);
            let dug: HashSet<_> = plan(&volume)
                .unwrap()
                .into_iter()
                .map(|loc| loc - volume.anchor)
                .collect();

            let clear = |loc: BlockLocation| loc.y > 0 || dug.contains(&loc);

            for layer in 0..volume.height {
                let step = stairs.step(layer);
                for dy in 0..=2 {
                    let loc = step.add_y(dy);
                    assert!(clear(loc), "{loc} blocks layer {layer} of {volume:?}");
                }
            }
        }
    }

    /// every step keeps the block it stands on, so the staircase can be
    /// climbed back out. A single lane has nowhere to turn and is exempt.
    #[test]
    fn step_floors_are_kept() {
        for volume in volumes().filter(|volume| volume.depth >= 2) {
            let stairs = Staircase::new(volume.width, volume.height, volume.depth);
            let dug: HashSet<_> = plan(&volume)
                .unwrap()
                .into_iter()
                .map(|loc| loc - volume.anchor)
                .collect();

            for layer in 0..volume.height {
                let step = stairs.step(layer);
                assert!(
                    !dug.contains(&step.below()),
                    "floor under {step} (layer {layer}) dug in {volume:?}"
                );
            }
        }
    }

    #[test]
    fn two_lane_turn() {
        let stairs = Staircase::new(3, 4, 2);

        // last lane of the first cycle notches level with itself and one up
        assert_eq!(
            stairs.layer_cells(1).into_vec(),
            vec![
                BlockLocation::new(3, -1, 1),
                BlockLocation::new(3, 0, 1),
                BlockLocation::new(4, -1, 1),
                BlockLocation::new(4, 0, 1),
            ]
        );
        assert_eq!(stairs.step(2), BlockLocation::new(4, -2, 1));
        assert_eq!(stairs.step(0).below(), BlockLocation::new(3, -1, 0));
    }

    #[test]
    fn single_lane_alternates_columns() {
        let stairs = Staircase::new(1, 3, 1);

        assert_eq!(
            stairs.layer_cells(0).into_vec(),
            vec![BlockLocation::new(1, 0, 0), BlockLocation::new(2, 0, 0)]
        );
        assert_eq!(
            stairs.layer_cells(1).into_vec(),
            vec![
                BlockLocation::new(2, -1, 0),
                BlockLocation::new(2, 0, 0),
                BlockLocation::new(1, -1, 0),
                BlockLocation::new(1, 0, 0),
            ]
        );
        // bottom layer: no notch
        assert_eq!(
            stairs.layer_cells(2).into_vec(),
            vec![BlockLocation::new(1, -2, 0), BlockLocation::new(1, -1, 0)]
        );
    }
}
