use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Store-unique, positive hitbox identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HitboxId(NonZeroU32);

impl HitboxId {
    pub const FIRST: HitboxId = HitboxId(NonZeroU32::MIN);

    /// Returns `None` for zero; ids start at 1.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub(crate) fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for HitboxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lower bounds enforced on values typed into the detail panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLimits {
    pub min_dimension: i32,
    pub min_position: i32,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            min_dimension: 10,
            min_position: 10,
        }
    }
}

/// The four editable attributes of a hitbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HitboxField {
    X,
    Y,
    Width,
    Height,
}

impl HitboxField {
    pub const ALL: [HitboxField; 4] = [
        HitboxField::X,
        HitboxField::Y,
        HitboxField::Width,
        HitboxField::Height,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HitboxField::X => "X",
            HitboxField::Y => "Y",
            HitboxField::Width => "Width",
            HitboxField::Height => "Height",
        }
    }

    pub fn minimum(self, limits: &FieldLimits) -> i32 {
        match self {
            HitboxField::X | HitboxField::Y => limits.min_position,
            HitboxField::Width | HitboxField::Height => limits.min_dimension,
        }
    }

    /// Clamps a parsed input into the field's valid range. Missing or
    /// non-numeric input collapses to the minimum.
    pub fn clamp(self, value: Option<i64>, limits: &FieldLimits) -> i32 {
        let min = self.minimum(limits);
        match value {
            Some(v) => v.clamp(i64::from(min), i64::from(i32::MAX)) as i32,
            None => min,
        }
    }
}

/// Parses text typed into a numeric field. Fractions round to the nearest
/// integer; anything that is not a finite number yields `None`.
pub fn parse_field_input(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<i64>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok().filter(|v| v.is_finite())?;
    // Saturating cast keeps huge inputs in range for the later clamp.
    Some(v.round() as i64)
}

/// An axis-aligned rectangle overlaid on the image, in overlay pixels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hitbox {
    id: HitboxId,
    origin_x: i32,
    origin_y: i32,
    width: i32,
    height: i32,
}

impl Hitbox {
    pub fn new(id: HitboxId, origin: Point, width: i32, height: i32) -> Self {
        Self {
            id,
            origin_x: origin.x,
            origin_y: origin.y,
            width,
            height,
        }
    }

    pub fn id(&self) -> HitboxId {
        self.id
    }

    pub fn origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn field(&self, field: HitboxField) -> i32 {
        match field {
            HitboxField::X => self.origin_x,
            HitboxField::Y => self.origin_y,
            HitboxField::Width => self.width,
            HitboxField::Height => self.height,
        }
    }

    /// Repositions without clamping; used by dragging.
    pub fn move_to(&mut self, origin: Point) {
        self.origin_x = origin.x;
        self.origin_y = origin.y;
    }

    /// Writes one field from user input, clamped to that field's range.
    pub fn set_field(&mut self, field: HitboxField, value: Option<i64>, limits: &FieldLimits) {
        let v = field.clamp(value, limits);
        match field {
            HitboxField::X => self.origin_x = v,
            HitboxField::Y => self.origin_y = v,
            HitboxField::Width => self.width = v,
            HitboxField::Height => self.height = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Hitbox {
        Hitbox::new(HitboxId::new(1).unwrap(), Point::new(200, 200), 150, 150)
    }

    #[test]
    fn zero_is_not_an_id() {
        assert!(HitboxId::new(0).is_none());
        assert_eq!(HitboxId::new(7).map(HitboxId::get), Some(7));
    }

    #[test]
    fn parse_accepts_integers_and_fractions() {
        assert_eq!(parse_field_input(" 42 "), Some(42));
        assert_eq!(parse_field_input("-8"), Some(-8));
        assert_eq!(parse_field_input("12.6"), Some(13));
        assert_eq!(parse_field_input("abc"), None);
        assert_eq!(parse_field_input(""), None);
        assert_eq!(parse_field_input("NaN"), None);
        assert_eq!(parse_field_input("inf"), None);
    }

    #[test]
    fn negative_width_clamps_to_minimum() {
        let limits = FieldLimits::default();
        let mut hb = sample();
        hb.set_field(HitboxField::Width, Some(-40), &limits);
        assert_eq!(hb.width(), 10);
        hb.set_field(HitboxField::Height, parse_field_input("tall"), &limits);
        assert_eq!(hb.height(), 10);
    }

    #[test]
    fn position_fields_use_position_minimum() {
        let limits = FieldLimits {
            min_dimension: 10,
            min_position: 0,
        };
        let mut hb = sample();
        hb.set_field(HitboxField::X, Some(-5), &limits);
        assert_eq!(hb.origin(), Point::new(0, 200));
        hb.set_field(HitboxField::Y, Some(i64::MAX), &limits);
        assert_eq!(hb.field(HitboxField::Y), i32::MAX);
    }

    #[test]
    fn set_field_only_touches_its_field() {
        let mut hb = sample();
        hb.set_field(HitboxField::Width, Some(300), &FieldLimits::default());
        assert_eq!(hb.origin(), Point::new(200, 200));
        assert_eq!((hb.width(), hb.height()), (300, 150));
    }

    #[test]
    fn move_to_is_unclamped() {
        let mut hb = sample();
        hb.move_to(Point::new(-500, -1));
        assert_eq!(hb.origin(), Point::new(-500, -1));
    }
}
