//! Printout placement: page layout and the hand/frame transforms printouts are drawn under.
//!
//! Printouts are drawn like maps. Every transform here maps printout space
//! (pixels, origin at the top-left of the first page) into the item's local space.

use crate::types::Transform;
use std::f32::consts::PI;

pub const LINE_MAX_LENGTH: u32 = 25;
pub const LINES_PER_PAGE: u32 = 21;
pub const FONT_WIDTH: u32 = 6;
pub const FONT_HEIGHT: u32 = 9;
pub const X_TEXT_MARGIN: u32 = 13;
pub const Y_TEXT_MARGIN: u32 = 11;
pub const COVER_SIZE: u32 = 12;

/// Horizontal offset of the stacked page edges behind the front page.
///
/// Grows with the page count and levels off just under 32.
pub fn offset_at(page: u32) -> f32 {
    (32.0 * (1.0 - 1.2f64.powi(-(page as i32)))).floor() as f32
}

/// Size and scaling of a printout with `pages` pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintoutLayout {
    pub pages: u32,
    pub book: bool,
    /// Width of the drawn page area, including the page stack of loose printouts.
    pub width: f32,
    pub height: f32,
    /// Size including book covers.
    pub visual_width: f32,
    pub visual_height: f32,
    /// Uniform scale fitting the larger visual dimension into 0..1.
    pub scale: f32,
}

impl PrintoutLayout {
    pub fn new(pages: u32, book: bool) -> Self {
        let mut width = (LINE_MAX_LENGTH * FONT_WIDTH + X_TEXT_MARGIN * 2) as f32;
        let height = (LINES_PER_PAGE * FONT_HEIGHT + Y_TEXT_MARGIN * 2) as f32;

        // Loose pages are left aligned; books are centred between their covers.
        if !book {
            width += offset_at(pages);
        }

        let (mut visual_width, mut visual_height) = (width, height);
        if book {
            visual_width += (2 * COVER_SIZE) as f32 + 2.0 * offset_at(pages);
            visual_height += (2 * COVER_SIZE) as f32;
        }

        let max = visual_width.max(visual_height);
        Self {
            pages,
            book,
            width,
            height,
            visual_width,
            visual_height,
            scale: 1.0 / max,
        }
    }

    fn max_dimension(&self) -> f32 {
        self.visual_width.max(self.visual_height)
    }

    /// Printout pixels into the unit square, centred.
    pub fn transform(&self) -> Transform {
        let max = self.max_dimension();
        Transform::from_scale([self.scale; 3]).then(&Transform::from_translation([
            (max - self.width) / 2.0,
            (max - self.height) / 2.0,
            0.0,
        ]))
    }
}

/// Placement of a printout held in hand, applied before the layout transform.
pub fn in_hand_transform() -> Transform {
    Transform::from_rotation_y_degrees(180.0)
        .then(&Transform::from_rotation_z_degrees(180.0))
        .then(&Transform::from_scale([0.42, 0.42, -0.42]))
        .then(&Transform::from_translation([-0.5, -0.48, 0.0]))
}

/// Placement of a printout in an item frame, nudged forward to avoid clipping the frame.
pub fn in_frame_transform() -> Transform {
    Transform::from_translation([0.0, 0.0, -0.001])
        .then(&Transform::from_rotation_z_degrees(180.0))
        .then(&Transform::from_scale([0.95, 0.95, -0.95]))
        .then(&Transform::from_translation([-0.5, -0.5, 0.0]))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    pub fn opposite(self) -> Self {
        match self {
            HandSide::Left => HandSide::Right,
            HandSide::Right => HandSide::Left,
        }
    }
}

/// Which of the player's hands holds the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Main,
    Off,
}

/// How far a map-like item tilts towards the camera as the player looks down.
pub fn map_angle_from_pitch(pitch: f32) -> f32 {
    let f = (1.0 - pitch / 45.0 + 0.1).clamp(0.0, 1.0);
    -(f * PI).cos() * 0.5 + 0.5
}

/// First-person transform for a printout held in the main hand with the other hand empty.
pub fn first_person_center(pitch: f32, equip_progress: f32, swing_progress: f32) -> Transform {
    let swing_root = swing_progress.sqrt();
    let t_x = -0.2 * (swing_progress * PI).sin();
    let t_z = -0.4 * (swing_root * PI).sin();
    let pitch_angle = map_angle_from_pitch(pitch);
    let r_x = (swing_root * PI).sin();

    Transform::from_translation([0.0, -t_x / 2.0, t_z])
        .then(&Transform::from_translation([
            0.0,
            0.04 + equip_progress * -1.2 + pitch_angle * -0.5,
            -0.72,
        ]))
        .then(&Transform::from_rotation_x_degrees(pitch_angle * -85.0))
        .then(&Transform::from_rotation_x_degrees(r_x * 20.0))
        .then(&Transform::from_scale([2.0, 2.0, 2.0]))
}

/// First-person transform for a printout held to one side.
pub fn first_person_side(side: HandSide, equip_progress: f32, swing_progress: f32) -> Transform {
    let offset = match side {
        HandSide::Right => 1.0,
        HandSide::Left => -1.0,
    };
    let f1 = swing_progress.sqrt();
    let f2 = (f1 * PI).sin();
    let f3 = -0.5 * f2;
    let f4 = 0.4 * (f1 * PI * 2.0).sin();
    let f5 = -0.3 * (swing_progress * PI).sin();

    Transform::from_translation([offset * 0.125, -0.125, 0.0])
        .then(&Transform::from_translation([
            offset * 0.51,
            -0.08 + equip_progress * -1.2,
            -0.75,
        ]))
        .then(&Transform::from_translation([offset * f3, f4 - 0.3 * f2, f5]))
        .then(&Transform::from_rotation_x_degrees(f2 * -45.0))
        .then(&Transform::from_rotation_y_degrees(offset * f2 * -30.0))
}

/// First-person transform for a printout held in `hand`.
///
/// A main-hand printout is centred while the off hand is empty. Otherwise it is held
/// to the side: the main hand on the `primary` side, the off hand on the other.
pub fn first_person_transform(
    hand: Hand,
    primary: HandSide,
    offhand_empty: bool,
    pitch: f32,
    equip_progress: f32,
    swing_progress: f32,
) -> Transform {
    match hand {
        Hand::Main if offhand_empty => first_person_center(pitch, equip_progress, swing_progress),
        Hand::Main => first_person_side(primary, equip_progress, swing_progress),
        Hand::Off => first_person_side(primary.opposite(), equip_progress, swing_progress),
    }
}
