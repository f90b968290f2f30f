//! Shared types used throughout the library.

mod direction;
mod transform;

pub use direction::{face_slot, Axis, Direction, FaceFilter, FACE_FILTER_COUNT};
pub use transform::{ElementRotation, Transform};

use std::collections::HashMap;

/// A block position in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Get the neighboring position in the given direction.
    pub fn neighbor(&self, direction: Direction) -> Self {
        let (dx, dy, dz) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    pub fn as_f32(&self) -> [f32; 3] {
        [self.x as f32, self.y as f32, self.z as f32]
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    pub const fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: impl Iterator<Item = [f32; 3]>) -> Option<Self> {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        let mut has_points = false;

        for p in points {
            has_points = true;
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        if has_points {
            Some(Self { min, max })
        } else {
            None
        }
    }

    pub fn dimensions(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: [f32; 3]) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// Smallest box enclosing both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let mut min = self.min;
        let mut max = self.max;
        for i in 0..3 {
            min[i] = min[i].min(other.min[i]);
            max[i] = max[i].max(other.max[i]);
        }
        BoundingBox { min, max }
    }

    /// The eight corners, bit 0/1/2 of the index selecting max on x/y/z.
    pub fn corners(&self) -> [[f32; 3]; 8] {
        let mut corners = [[0.0; 3]; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            for axis in 0..3 {
                corner[axis] = if i & (1 << axis) != 0 {
                    self.max[axis]
                } else {
                    self.min[axis]
                };
            }
        }
        corners
    }
}

/// A block state: block name plus properties.
///
/// Models receive this verbatim on every quad query; the built-in models ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBlock {
    /// Block name, e.g., "computercraft:turtle_normal"
    pub name: String,
    /// Block properties, e.g., {"facing": "north"}
    pub properties: HashMap<String, String>,
}

impl InputBlock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Get the namespace (e.g., "computercraft").
    pub fn namespace(&self) -> &str {
        match self.name.split_once(':') {
            Some((namespace, _)) => namespace,
            None => "minecraft",
        }
    }

    /// Get the block ID without namespace (e.g., "turtle_normal").
    pub fn block_id(&self) -> &str {
        self.name.split(':').nth(1).unwrap_or(&self.name)
    }
}

/// Which side of a turtle an upgrade is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurtleSide {
    Left,
    Right,
}

impl TurtleSide {
    pub const ALL: [TurtleSide; 2] = [TurtleSide::Left, TurtleSide::Right];
}

impl std::fmt::Display for TurtleSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurtleSide::Left => write!(f, "left"),
            TurtleSide::Right => write!(f, "right"),
        }
    }
}
