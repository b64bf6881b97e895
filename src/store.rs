//! Canonical, ordered hitbox collection.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::hitbox::{FieldLimits, Hitbox, HitboxField, HitboxId};

/// Constants governing where and how big new hitboxes are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementDefaults {
    pub origin: Point,
    /// Added to both axes of the cursor after every creation.
    pub step: i32,
    pub width: i32,
    pub height: i32,
}

impl Default for PlacementDefaults {
    fn default() -> Self {
        Self {
            origin: Point::new(200, 200),
            step: 90,
            width: 150,
            height: 150,
        }
    }
}

impl PlacementDefaults {
    pub fn field(&self, field: HitboxField) -> i32 {
        match field {
            HitboxField::X => self.origin.x,
            HitboxField::Y => self.origin.y,
            HitboxField::Width => self.width,
            HitboxField::Height => self.height,
        }
    }
}

/// Origin and size the next created hitbox will get. Independent of every
/// existing hitbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementCursor {
    pub origin: Point,
    pub width: i32,
    pub height: i32,
}

impl PlacementCursor {
    fn from_defaults(defaults: &PlacementDefaults) -> Self {
        Self {
            origin: defaults.origin,
            width: defaults.width,
            height: defaults.height,
        }
    }

    pub fn field(&self, field: HitboxField) -> i32 {
        match field {
            HitboxField::X => self.origin.x,
            HitboxField::Y => self.origin.y,
            HitboxField::Width => self.width,
            HitboxField::Height => self.height,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HitboxStore {
    hitboxes: Vec<Hitbox>,
    cursor: PlacementCursor,
    defaults: PlacementDefaults,
    limits: FieldLimits,
}

impl Default for HitboxStore {
    fn default() -> Self {
        Self::new(PlacementDefaults::default(), FieldLimits::default())
    }
}

impl HitboxStore {
    pub fn new(defaults: PlacementDefaults, limits: FieldLimits) -> Self {
        Self {
            hitboxes: Vec::new(),
            cursor: PlacementCursor::from_defaults(&defaults),
            defaults,
            limits,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hitbox> {
        self.hitboxes.iter()
    }

    pub fn len(&self) -> usize {
        self.hitboxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hitboxes.is_empty()
    }

    pub fn get(&self, id: HitboxId) -> Option<&Hitbox> {
        self.hitboxes.iter().find(|h| h.id() == id)
    }

    pub fn contains(&self, id: HitboxId) -> bool {
        self.get(id).is_some()
    }

    fn get_mut(&mut self, id: HitboxId) -> Option<&mut Hitbox> {
        self.hitboxes.iter_mut().find(|h| h.id() == id)
    }

    pub fn cursor(&self) -> PlacementCursor {
        self.cursor
    }

    /// Smallest positive id not currently in use.
    pub fn next_id(&self) -> HitboxId {
        let mut used: Vec<u32> = self.hitboxes.iter().map(|h| h.id().get()).collect();
        used.sort_unstable();
        let mut candidate = HitboxId::FIRST;
        for id in used {
            if id != candidate.get() {
                break;
            }
            candidate = candidate.successor();
        }
        candidate
    }

    /// Appends a hitbox at the placement cursor and advances the cursor.
    pub fn create(&mut self) -> Hitbox {
        let id = self.next_id();
        let hitbox = Hitbox::new(id, self.cursor.origin, self.cursor.width, self.cursor.height);
        self.hitboxes.push(hitbox.clone());

        let step = self.defaults.step;
        self.cursor.origin = Point::new(
            self.cursor.origin.x.saturating_add(step),
            self.cursor.origin.y.saturating_add(step),
        );
        log::debug!(
            "created hitbox {} at ({}, {}), cursor now ({}, {})",
            id,
            hitbox.origin().x,
            hitbox.origin().y,
            self.cursor.origin.x,
            self.cursor.origin.y
        );
        hitbox
    }

    /// Sets one field from user input. Returns false when `id` is absent.
    pub fn update(&mut self, id: HitboxId, field: HitboxField, value: Option<i64>) -> bool {
        let limits = self.limits;
        match self.get_mut(id) {
            Some(hb) => {
                hb.set_field(field, value, &limits);
                true
            }
            None => false,
        }
    }

    /// Rewrites one field of `id` to its constant default.
    pub fn reset_field(&mut self, id: HitboxId, field: HitboxField) -> bool {
        let value = self.defaults.field(field);
        self.update(id, field, Some(i64::from(value)))
    }

    /// Unclamped reposition, as produced by a drag.
    pub fn move_hitbox(&mut self, id: HitboxId, origin: Point) -> bool {
        match self.get_mut(id) {
            Some(hb) => {
                hb.move_to(origin);
                true
            }
            None => false,
        }
    }

    /// Removes `id` right away. Returns `None` if it was not present.
    pub fn remove(&mut self, id: HitboxId) -> Option<Hitbox> {
        let idx = self.hitboxes.iter().position(|h| h.id() == id)?;
        Some(self.hitboxes.remove(idx))
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = PlacementCursor::from_defaults(&self.defaults);
    }

    /// Drops every hitbox and resets the placement cursor.
    pub fn clear(&mut self) {
        self.hitboxes.clear();
        self.reset_cursor();
    }
}
