//! Cable and wired-modem outlines.
//!
//! A cable block can hold both a cable and a modem. When the player looks at one,
//! only the part under the cursor is outlined and only that part shows the
//! breaking animation.

use crate::types::{BlockPosition, BoundingBox, Direction};
use std::collections::HashSet;

const CORE_MIN: f32 = 0.375;
const CORE_MAX: f32 = 0.625;

/// Modem plates, indexed by [`Direction::index`].
const MODEM_BOXES: [BoundingBox; 6] = [
    BoundingBox::new([0.125, 0.0, 0.125], [0.875, 0.1875, 0.875]),
    BoundingBox::new([0.125, 0.8125, 0.125], [0.875, 1.0, 0.875]),
    BoundingBox::new([0.125, 0.125, 0.0], [0.875, 0.875, 0.1875]),
    BoundingBox::new([0.125, 0.125, 0.8125], [0.875, 0.875, 1.0]),
    BoundingBox::new([0.0, 0.125, 0.125], [0.1875, 0.875, 0.875]),
    BoundingBox::new([0.8125, 0.125, 0.125], [1.0, 0.875, 0.875]),
];

/// Outline colour: translucent black.
pub const OUTLINE_COLOUR: [f32; 4] = [0.0, 0.0, 0.0, 0.4];

/// What a cable block currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CableState {
    /// Face the modem is attached to.
    pub modem: Option<Direction>,
    pub cable: bool,
    /// Cable connections, indexed by [`Direction::index`].
    pub connections: [bool; 6],
}

impl CableState {
    pub fn cable() -> Self {
        Self {
            cable: true,
            ..Self::default()
        }
    }

    pub fn with_modem(mut self, facing: Direction) -> Self {
        self.modem = Some(facing);
        self
    }

    pub fn with_connection(mut self, direction: Direction) -> Self {
        self.connections[direction.index()] = true;
        self
    }

    pub fn is_connected(&self, direction: Direction) -> bool {
        self.connections[direction.index()]
    }
}

/// A shape made of axis-aligned boxes in block-local space.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VoxelShape {
    boxes: Vec<BoundingBox>,
}

impl VoxelShape {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_boxes(boxes: Vec<BoundingBox>) -> Self {
        Self { boxes }
    }

    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Smallest box enclosing the whole shape.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.boxes.iter().copied().reduce(|a, b| a.union(&b))
    }

    /// Every box edge as a line segment, duplicates removed.
    pub fn edges(&self) -> Vec<([f32; 3], [f32; 3])> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();

        for bounds in &self.boxes {
            let corners = bounds.corners();
            for a in 0..8usize {
                for axis in 0..3 {
                    let b = a | (1 << axis);
                    if b == a {
                        continue;
                    }
                    let edge = (corners[a], corners[b]);
                    if seen.insert(edge_key(edge)) {
                        edges.push(edge);
                    }
                }
            }
        }
        edges
    }
}

fn edge_key((a, b): ([f32; 3], [f32; 3])) -> [u32; 6] {
    let bits = |p: [f32; 3]| p.map(f32::to_bits);
    let (a, b) = (bits(a), bits(b));
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    [lo[0], lo[1], lo[2], hi[0], hi[1], hi[2]]
}

/// The arm running from the cable core to `direction`'s face.
fn arm_box(direction: Direction) -> BoundingBox {
    let mut min = [CORE_MIN; 3];
    let mut max = [CORE_MAX; 3];
    let axis = match direction {
        Direction::Down | Direction::Up => 1,
        Direction::North | Direction::South => 2,
        Direction::West | Direction::East => 0,
    };
    match direction {
        Direction::Down | Direction::North | Direction::West => {
            min[axis] = 0.0;
            max[axis] = CORE_MIN;
        }
        Direction::Up | Direction::South | Direction::East => {
            min[axis] = CORE_MAX;
            max[axis] = 1.0;
        }
    }
    BoundingBox::new(min, max)
}

/// The cable core plus an arm per connection, empty without a cable.
pub fn cable_shape(state: &CableState) -> VoxelShape {
    if !state.cable {
        return VoxelShape::empty();
    }
    let mut boxes = vec![BoundingBox::new([CORE_MIN; 3], [CORE_MAX; 3])];
    boxes.extend(
        Direction::ALL
            .into_iter()
            .filter(|d| state.is_connected(*d))
            .map(arm_box),
    );
    VoxelShape::from_boxes(boxes)
}

/// The modem plate, empty without a modem.
pub fn modem_shape(state: &CableState) -> VoxelShape {
    match state.modem {
        Some(facing) => VoxelShape::from_boxes(vec![MODEM_BOXES[facing.index()]]),
        None => VoxelShape::empty(),
    }
}

/// Whether a block-local point falls on the modem part of the block.
fn hits_modem(state: &CableState, local_hit: [f32; 3]) -> bool {
    modem_shape(state)
        .bounds()
        .is_some_and(|bounds| bounds.contains(local_hit))
}

fn local_hit(block_pos: BlockPosition, hit: [f32; 3]) -> [f32; 3] {
    let origin = block_pos.as_f32();
    [hit[0] - origin[0], hit[1] - origin[1], hit[2] - origin[2]]
}

/// The part of a cable block to outline for a hit at world position `hit`.
///
/// `None` unless the block has both a cable and a modem; those blocks use the
/// regular full-block outline.
pub fn highlight_shape(state: &CableState, block_pos: BlockPosition, hit: [f32; 3]) -> Option<VoxelShape> {
    if !state.cable || state.modem.is_none() {
        return None;
    }
    if hits_modem(state, local_hit(block_pos, hit)) {
        Some(modem_shape(state))
    } else {
        Some(cable_shape(state))
    }
}

/// The state to draw the breaking animation over: only the part being hit.
pub fn breaking_state(state: &CableState, block_pos: BlockPosition, hit: [f32; 3]) -> CableState {
    if hits_modem(state, local_hit(block_pos, hit)) {
        CableState {
            modem: state.modem,
            ..CableState::default()
        }
    } else {
        CableState {
            modem: None,
            ..*state
        }
    }
}

/// Line segments ready to draw relative to the camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub lines: Vec<([f32; 3], [f32; 3])>,
    pub colour: [f32; 4],
}

impl Outline {
    pub fn new(shape: &VoxelShape, block_pos: BlockPosition, camera: [f32; 3]) -> Self {
        let origin = block_pos.as_f32();
        let offset = [0, 1, 2].map(|i| origin[i] - camera[i]);
        let shift = |p: [f32; 3]| [p[0] + offset[0], p[1] + offset[1], p[2] + offset[2]];

        Self {
            lines: shape
                .edges()
                .into_iter()
                .map(|(a, b)| (shift(a), shift(b)))
                .collect(),
            colour: OUTLINE_COLOUR,
        }
    }

    /// Line width scaled for wide framebuffers, never below 2.5.
    pub fn line_width(framebuffer_width: u32) -> f32 {
        (framebuffer_width as f32 / 1920.0 * 2.5).max(2.5)
    }
}
