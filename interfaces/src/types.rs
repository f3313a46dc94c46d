use std::{
    fmt::{Debug, Display, Formatter},
    ops::{Add, Sub},
};

use serde::{Deserialize, Serialize};

/// A block location. Unlike the protocol's packed position every axis is an
/// `i32` so that a volume can be translated anywhere without casting.
#[derive(
    Copy, Clone, Debug, Hash, PartialOrd, PartialEq, Ord, Eq, Default, Serialize, Deserialize,
)]
pub struct BlockLocation {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Add for BlockLocation {
    type Output = BlockLocation;

    fn add(self, rhs: Self) -> Self::Output {
        let BlockLocation { x, y, z } = self;
        BlockLocation::new(x + rhs.x, y + rhs.y, z + rhs.z)
    }
}

impl Sub for BlockLocation {
    type Output = BlockLocation;

    fn sub(self, rhs: Self) -> Self::Output {
        let BlockLocation { x, y, z } = self;
        BlockLocation::new(x - rhs.x, y - rhs.y, z - rhs.z)
    }
}

impl BlockLocation {
    pub const fn new(x: i32, y: i32, z: i32) -> BlockLocation {
        BlockLocation { x, y, z }
    }

    pub const fn below(&self) -> BlockLocation {
        self.add_y(-1)
    }

    pub const fn above(&self) -> BlockLocation {
        self.add_y(1)
    }

    pub const fn add_y(&self, dy: i32) -> BlockLocation {
        let &BlockLocation { x, y, z } = self;
        Self { x, y: y + dy, z }
    }

    /// The four horizontal neighbours in +x, -x, +z, -z order
    pub const fn horizontal_neighbors(&self) -> [BlockLocation; 4] {
        let &BlockLocation { x, y, z } = self;
        [
            BlockLocation::new(x + 1, y, z),
            BlockLocation::new(x - 1, y, z),
            BlockLocation::new(x, y, z + 1),
            BlockLocation::new(x, y, z - 1),
        ]
    }

    pub fn abs_dif(&self, other: BlockLocation) -> (u32, u32, u32) {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        (dx, dy, dz)
    }

    pub fn dist2(&self, other: BlockLocation) -> u64 {
        let (dx, dy, dz) = self.abs_dif(other);
        let (dx, dy, dz) = (u64::from(dx), u64::from(dy), u64::from(dz));
        dx * dx + dy * dy + dz * dz
    }
}

impl Display for BlockLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[{}, {}, {}]", self.x, self.y, self.z))
    }
}

/// What the dig filter needs to know about a block
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BlockKind {
    Air,
    /// A non-solid marker such as a torch. It never has to be dug.
    Torch,
    Other,
}

impl BlockKind {
    /// true if nothing has to be broken at this location
    pub const fn is_cleared(self) -> bool {
        matches!(self, BlockKind::Air | BlockKind::Torch)
    }
}

/// A block state packed as `id << 4 | metadata`
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(transparent)]
pub struct BlockState(pub u32);

impl Debug for BlockState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}:{}", self.0 >> 4, self.0 % 16))
    }
}

impl BlockState {
    pub const AIR: BlockState = BlockState(0);
    pub const STONE: BlockState = BlockState(16);
    pub const BEDROCK: BlockState = BlockState(7 << 4);
    pub const TORCH: BlockState = BlockState(50 << 4);

    pub const fn id(&self) -> u32 {
        self.0 >> 4
    }

    pub const fn kind(&self) -> BlockKind {
        match self.id() {
            0 => BlockKind::Air,
            // torch, redstone torch (off, on)
            50 | 75 | 76 => BlockKind::Torch,
            _ => BlockKind::Other,
        }
    }

    /// A player can stand inside this block
    pub const fn walk_through(&self) -> bool {
        matches!(
            self.id(),
            0| // air
            6| // sapling
            27|28| // rail
            31| // grass/fern/dead shrub
            37|38| // flower
            50|75|76 // torches
        )
    }

    /// Bedrock and barriers cannot be broken in survival
    pub const fn unbreakable(&self) -> bool {
        matches!(self.id(), 7 | 166)
    }
}

/// The anchor and extents of an excavation. The anchor is the top layer's
/// `(0, 0)` corner; layers descend in y.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub anchor: BlockLocation,
    /// x extent
    pub width: i32,
    /// number of layers
    pub height: i32,
    /// z extent
    pub depth: i32,
}

impl Volume {
    pub const fn new(anchor: BlockLocation, width: i32, height: i32, depth: i32) -> Self {
        Self {
            anchor,
            width,
            height,
            depth,
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && self.depth > 0
    }

    /// The number of blocks in the footprint over every layer
    pub fn footprint_volume(&self) -> u64 {
        let w = u64::try_from(self.width).unwrap_or_default();
        let h = u64::try_from(self.height).unwrap_or_default();
        let d = u64::try_from(self.depth).unwrap_or_default();
        w * h * d
    }
}
