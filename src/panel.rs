//! Binding between the floating detail panel and the one "open" hitbox.

use crate::hitbox::{parse_field_input, HitboxField, HitboxId};
use crate::store::HitboxStore;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetailPanel {
    open: Option<HitboxId>,
}

impl DetailPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `id` for editing, replacing whatever was open.
    pub fn open(&mut self, id: HitboxId) {
        if self.open != Some(id) {
            log::debug!("detail panel: {:?} -> {}", self.open, id);
        }
        self.open = Some(id);
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn open_id(&self) -> Option<HitboxId> {
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Live value shown in `field`. Falls back to the placement cursor when
    /// nothing is open or the open id has vanished from the store.
    pub fn field_value(&self, field: HitboxField, store: &HitboxStore) -> i32 {
        self.open
            .and_then(|id| store.get(id))
            .map(|hb| hb.field(field))
            .unwrap_or_else(|| store.cursor().field(field))
    }

    /// Commits text typed into `field`. Invalid input is clamped by the
    /// store, never rejected.
    pub fn set_field(&self, field: HitboxField, raw: &str, store: &mut HitboxStore) -> bool {
        let Some(id) = self.open else {
            return false;
        };
        let parsed = parse_field_input(raw);
        if parsed.is_none() {
            log::debug!("non-numeric {} input {:?} for hitbox {}", field.label(), raw, id);
        }
        store.update(id, field, parsed)
    }

    /// Nudges `field` by `delta` from its current value.
    pub fn step_field(&self, field: HitboxField, delta: i32, store: &mut HitboxStore) -> bool {
        let Some(id) = self.open else {
            return false;
        };
        let Some(current) = store.get(id).map(|hb| hb.field(field)) else {
            return false;
        };
        store.update(id, field, Some(i64::from(current) + i64::from(delta)))
    }

    /// Rewrites only `field` of the open hitbox to its constant default.
    pub fn reset_field(&self, field: HitboxField, store: &mut HitboxStore) -> bool {
        match self.open {
            Some(id) => store.reset_field(id, field),
            None => false,
        }
    }
}
