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
use std::collections::HashMap;

use interfaces::types::{BlockKind, BlockLocation, BlockState};
use itertools::iproduct;

/// Sparse block storage. Locations that were never set are unloaded and read
/// as air.
#[derive(Default, Debug, Clone)]
pub struct WorldBlocks {
    storage: HashMap<BlockLocation, BlockState>,
}

impl WorldBlocks {
    pub fn get_block(&self, location: BlockLocation) -> Option<BlockState> {
        self.storage.get(&location).copied()
    }

    pub fn get_block_or_air(&self, location: BlockLocation) -> BlockState {
        self.get_block(location).unwrap_or(BlockState::AIR)
    }

    pub fn get_block_kind(&self, location: BlockLocation) -> BlockKind {
        self.get_block_or_air(location).kind()
    }

    pub fn set_block(&mut self, location: BlockLocation, block: BlockState) {
        self.storage.insert(location, block);
    }

    /// Set every block in the box spanned by the two corners (inclusive)
    pub fn fill(&mut self, a: BlockLocation, b: BlockLocation, block: BlockState) {
        let xs = a.x.min(b.x)..=a.x.max(b.x);
        let ys = a.y.min(b.y)..=a.y.max(b.y);
        let zs = a.z.min(b.z)..=a.z.max(b.z);

        for (x, y, z) in iproduct!(xs, ys, zs) {
            self.set_block(BlockLocation::new(x, y, z), block);
        }
    }

    /// A player fits with their feet in `location`
    pub fn standable(&self, location: BlockLocation) -> bool {
        self.get_block_or_air(location).walk_through()
            && self.get_block_or_air(location.above()).walk_through()
    }

    /// Locations that are not air, in no particular order
    pub fn solid_blocks(&self) -> impl Iterator<Item = BlockLocation> + '_ {
        self.storage
            .iter()
            .filter(|(_, state)| state.kind() != BlockKind::Air)
            .map(|(&loc, _)| loc)
    }
}
