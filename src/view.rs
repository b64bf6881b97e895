//! Cosmetic display settings: image scale, background grid, frame count
//! and flips.

use crate::config::{EditorConfig, SliderRange};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewSettings {
    scale_range: SliderRange,
    grid_range: SliderRange,
    frames_range: SliderRange,
    scale: u32,
    grid_size: u32,
    frames: u32,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
}

impl ViewSettings {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            scale_range: config.scale,
            grid_range: config.grid_size,
            scale: config.scale.clamp(config.scale.def),
            grid_size: config.grid_size.clamp(config.grid_size.def),
            frames_range: config.frames,
            frames: config.frames.clamp(config.frames.def),
            flip_horizontal: false,
            flip_vertical: false,
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn scale_range(&self) -> SliderRange {
        self.scale_range
    }

    pub fn set_scale(&mut self, value: u32) {
        self.scale = self.scale_range.clamp(value);
    }

    pub fn reset_scale(&mut self) {
        self.set_scale(self.scale_range.def);
    }

    pub fn is_default_scale(&self) -> bool {
        self.scale == self.scale_range.def
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn grid_range(&self) -> SliderRange {
        self.grid_range
    }

    pub fn set_grid_size(&mut self, value: u32) {
        self.grid_size = self.grid_range.clamp(value);
    }

    pub fn reset_grid_size(&mut self) {
        self.set_grid_size(self.grid_range.def);
    }

    pub fn is_default_grid(&self) -> bool {
        self.grid_size == self.grid_range.def
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn frames_range(&self) -> SliderRange {
        self.frames_range
    }

    pub fn set_frames(&mut self, value: u32) {
        self.frames = self.frames_range.clamp(value);
    }

    pub fn reset_frames(&mut self) {
        self.set_frames(self.frames_range.def);
    }

    pub fn is_default_frames(&self) -> bool {
        self.frames == self.frames_range.def
    }

    /// UV corners `[min, max]` for drawing the image with the current flips.
    pub fn uv(&self) -> [[f32; 2]; 2] {
        let (u0, u1) = if self.flip_horizontal { (1.0, 0.0) } else { (0.0, 1.0) };
        let (v0, v1) = if self.flip_vertical { (1.0, 0.0) } else { (0.0, 1.0) };
        [[u0, v0], [u1, v1]]
    }
}
