//! Carousel arrangement of playlists.
//!
//! The carousel shows the focused playlist with up to two neighbors on each
//! side. Neighbors lose prominence with their distance from the focus.

use serde::Serialize;

/// number of neighbors shown on each side of the focused playlist
pub const VISIBLE_RADIUS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarouselSlot {
    /// index of the playlist shown in the slot
    pub index: usize,
    /// signed distance from the focused slot
    pub offset: i32,
}

/// computes the visible slots around `current`, wrapping around both ends.
///
/// With fewer than five playlists, the same playlist can occupy several slots.
pub fn visible_slots(len: usize, current: usize) -> Vec<CarouselSlot> {
    if len == 0 {
        return Vec::new();
    }
    let len = len as i64;
    (-VISIBLE_RADIUS..=VISIBLE_RADIUS)
        .map(|offset| CarouselSlot {
            index: (current as i64 + i64::from(offset)).rem_euclid(len) as usize,
            offset,
        })
        .collect()
}

pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current + 1) % len
}

pub fn prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current % len + len - 1) % len
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Visual treatment of a slot, in pixels and degrees
pub struct SlotTransform {
    pub translate_x: i32,
    pub translate_y: i32,
    pub rotate_y: i32,
    pub rotate_z: i32,
    pub skew_y: i32,
    pub scale: f32,
    pub opacity: f32,
    pub blur: u32,
    /// stacking order, the focused slot is on top
    pub layer: u8,
}

impl SlotTransform {
    pub fn for_offset(offset: i32) -> Self {
        let distance = offset.unsigned_abs();
        let (scale, opacity, layer) = match distance {
            0 => (1.0, 1.0, 2),
            1 => (0.8, 0.6, 1),
            _ => (0.65, 0.3, 0),
        };
        Self {
            translate_x: offset * 180,
            translate_y: offset.abs() * 25,
            rotate_y: offset * -20,
            rotate_z: offset * 4,
            skew_y: offset * 2,
            scale,
            opacity,
            blur: distance * 2,
            layer,
        }
    }

    /// the transform as a CSS `transform` value
    pub fn css(&self) -> String {
        format!(
            "translateX({}px) translateY({}px) rotateY({}deg) rotateZ({}deg) skewY({}deg) scale({})",
            self.translate_x, self.translate_y, self.rotate_y, self.rotate_z, self.skew_y, self.scale
        )
    }

    /// the blur as a CSS `filter` value
    pub fn filter(&self) -> String {
        if self.blur == 0 {
            "none".to_string()
        } else {
            format!("blur({}px)", self.blur)
        }
    }
}
