use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;
use hitbox_edit::animation::Phase;
use hitbox_edit::session::RfdDialog;
use hitbox_edit::{
    ContainerFrame, EditorConfig, EditorState, HitboxField, HitboxId, ImageSession, OpenOutcome, Point,
    ViewSettings,
};

// ── Palette ─────────────────────────────────────────────────────────────────

const BACKGROUND: egui::Color32 = egui::Color32::from_gray(30);
const GRID_LINE: egui::Color32 = egui::Color32::from_gray(45);
const HITBOX_STROKE: egui::Color32 = egui::Color32::from_rgb(48, 200, 120);
const HITBOX_OPEN: egui::Color32 = egui::Color32::from_rgb(255, 200, 40);
const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(240, 90, 90);

fn to_point(pos: egui::Pos2) -> Point {
    Point::from_f32(pos.x, pos.y)
}

fn to_pos(p: Point) -> egui::Pos2 {
    egui::pos2(p.x as f32, p.y as f32)
}

fn with_alpha(c: egui::Color32, alpha: f32) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

// ── App ─────────────────────────────────────────────────────────────────────

pub struct HitboxEditApp {
    editor: EditorState,
    session: ImageSession,
    view: ViewSettings,
    dialog: RfdDialog,
    window_size: egui::Vec2,
    fitted_to_monitor: bool,

    /// Texture plus the session generation it was built from.
    texture: Option<(u64, egui::TextureHandle)>,
    status: Option<String>,

    /// Text being typed into each panel field, indexed by `HitboxField as usize`.
    drafts: [String; 4],
    /// Field whose draft is being edited and must not be refreshed.
    editing: Option<HitboxField>,
}

impl HitboxEditApp {
    pub fn new(config: EditorConfig, initial_image: Option<PathBuf>) -> Self {
        let mut app = Self {
            editor: EditorState::new(&config),
            session: ImageSession::new(),
            view: ViewSettings::new(&config),
            dialog: RfdDialog,
            window_size: egui::vec2(config.window_size[0], config.window_size[1]),
            fitted_to_monitor: false,
            texture: None,
            status: None,
            drafts: Default::default(),
            editing: None,
        };
        if let Some(path) = initial_image {
            if let Err(e) = app.session.load(&path) {
                log::error!("{}", e);
                app.status = Some(e.to_string());
            }
        }
        app
    }

    fn open_image(&mut self) {
        match self.session.open_with(&mut self.dialog) {
            Ok(OpenOutcome::Loaded) => self.status = None,
            Ok(OpenOutcome::Cancelled) => {}
            Err(e) => {
                log::warn!("{}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        let generation = self.session.generation();
        if matches!(self.texture, Some((g, _)) if g == generation) {
            return;
        }
        self.texture = self.session.image().map(|img| {
            let size = [img.pixels.width() as usize, img.pixels.height() as usize];
            let pixels = img.pixels.as_flat_samples();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
            let handle = ctx.load_texture("image", color_image, egui::TextureOptions::NEAREST);
            (generation, handle)
        });
    }

    /// Shrinks the initial window to the monitor's work area when needed.
    fn fit_to_monitor(&mut self, ctx: &egui::Context) {
        if self.fitted_to_monitor {
            return;
        }
        let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) else {
            return;
        };
        self.fitted_to_monitor = true;
        let fitted = self.window_size.min(monitor);
        if fitted != self.window_size {
            log::info!("window {:?} exceeds work area {:?}", self.window_size, monitor);
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(fitted));
        }
    }

    fn shortcuts(&mut self, ctx: &egui::Context, now: Duration) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (delete, escape) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace),
                i.key_pressed(egui::Key::Escape),
            )
        });
        if delete {
            self.editor.remove_open(now);
        }
        if escape {
            self.editor.close_panel();
        }
    }

    /// Routes window-wide pointer movement and release to the active drag.
    fn track_pointer(&mut self, ctx: &egui::Context) {
        if !self.editor.drag().capture().is_attached() {
            return;
        }
        let (pos, released) = ctx.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.any_released() || !i.pointer.any_down(),
            )
        });
        if let Some(pos) = pos {
            self.editor.pointer_moved(to_point(pos));
        }
        if released {
            self.editor.pointer_up();
        }
        ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
    }

    fn toolbar(&mut self, ctx: &egui::Context, now: Duration) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                let open_label = if self.session.image().is_some() {
                    "Change Image"
                } else {
                    "Open Image"
                };
                if ui.button(open_label).clicked() {
                    self.open_image();
                }
                if ui.button("Remove Image").clicked() {
                    self.session.close();
                }
                ui.separator();
                ui.toggle_value(&mut self.view.flip_horizontal, "Flip Horizontal");
                ui.toggle_value(&mut self.view.flip_vertical, "Flip Vertical");
                ui.separator();
                if ui.button("Create Hitbox").clicked() {
                    self.editor.add_hitbox(now);
                }
                ui.separator();

                let range = self.view.frames_range();
                let mut frames = self.view.frames();
                ui.label(format!("Frame Count: {frames}"));
                if self.view.is_default_frames() {
                    ui.weak("(Default)");
                } else if ui.small_button("⟲").on_hover_text("Reset frame count").clicked() {
                    self.view.reset_frames();
                    frames = self.view.frames();
                }
                if ui
                    .add(egui::DragValue::new(&mut frames).range(range.min..=range.max))
                    .changed()
                {
                    self.view.set_frames(frames);
                }
                ui.separator();

                let range = self.view.scale_range();
                let mut scale = self.view.scale();
                ui.label("Scale:");
                if ui
                    .add(egui::Slider::new(&mut scale, range.min..=range.max).step_by(f64::from(range.step)))
                    .changed()
                {
                    self.view.set_scale(scale);
                }
                if !self.view.is_default_scale() && ui.small_button("⟲").on_hover_text("Reset scale").clicked() {
                    self.view.reset_scale();
                }

                let range = self.view.grid_range();
                let mut grid = self.view.grid_size();
                ui.label("Grid:");
                if ui
                    .add(egui::Slider::new(&mut grid, range.min..=range.max).step_by(f64::from(range.step)))
                    .changed()
                {
                    self.view.set_grid_size(grid);
                }
                if !self.view.is_default_grid() && ui.small_button("⟲").on_hover_text("Reset grid").clicked() {
                    self.view.reset_grid_size();
                }
            });

            ui.horizontal(|ui| {
                match self.session.path() {
                    Some(path) => ui.label(format!("- Image path selected: {} -", path.display())),
                    None => ui.label("- No Image Loaded -"),
                };
                if let Some(img) = self.session.image() {
                    let [w, h] = img.size();
                    let [sw, sh] = img.scaled_size(self.view.scale());
                    ui.separator();
                    ui.label(format!("Image: {w}×{h} px   Scaled: {sw}×{sh} px"));
                }
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.colored_label(ERROR_TEXT, status);
                }
            });
        });
    }

    fn draw_grid(&self, painter: &egui::Painter, rect: egui::Rect) {
        let step = self.view.grid_size().max(1) as f32;
        let stroke = egui::Stroke::new(1.0, GRID_LINE);
        let mut x = rect.left();
        while x <= rect.right() {
            painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], stroke);
            x += step;
        }
        let mut y = rect.top();
        while y <= rect.bottom() {
            painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], stroke);
            y += step;
        }
    }

    fn canvas(&mut self, ctx: &egui::Context, now: Duration) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
            let canvas_rect = response.rect;

            painter.rect_filled(canvas_rect, 0.0, BACKGROUND);
            self.draw_grid(&painter, canvas_rect);

            if let (Some((_, tex)), Some(img)) = (&self.texture, self.session.image()) {
                let [w, h] = img.scaled_size(self.view.scale());
                let img_rect = egui::Rect::from_min_size(canvas_rect.min, egui::vec2(w as f32, h as f32));
                let [uv_min, uv_max] = self.view.uv();
                painter.image(
                    tex.id(),
                    img_rect,
                    egui::Rect::from_min_max(egui::pos2(uv_min[0], uv_min[1]), egui::pos2(uv_max[0], uv_max[1])),
                    egui::Color32::WHITE,
                );
            }

            let boxes: Vec<(HitboxId, egui::Rect)> = self
                .editor
                .store()
                .iter()
                .map(|hb| {
                    let min = canvas_rect.min + to_pos(hb.origin()).to_vec2();
                    (hb.id(), egui::Rect::from_min_size(min, egui::vec2(hb.width() as f32, hb.height() as f32)))
                })
                .collect();

            for (id, rect) in boxes {
                let resp = ui.interact(rect, ui.id().with(("hitbox", id.get())), egui::Sense::click_and_drag());
                if resp.drag_started() {
                    if let Some(press) = ctx.input(|i| i.pointer.press_origin()) {
                        // Measure the container now; it may have moved since the last drag.
                        let frame = ContainerFrame::new(to_point(canvas_rect.min));
                        self.editor.pointer_down_on_hitbox(id, to_point(press), frame);
                    }
                }
                if resp.clicked() {
                    self.editor.select(id);
                }
                if resp.hovered() && !self.editor.drag().is_active() {
                    ctx.set_cursor_icon(egui::CursorIcon::Grab);
                }

                let alpha = match self.editor.animator().progress(id, now) {
                    Some((Phase::Entering, t)) => t,
                    Some((Phase::Exiting, t)) => 1.0 - t,
                    None => 1.0,
                };
                let is_open = self.editor.panel().open_id() == Some(id);
                let base = if is_open { HITBOX_OPEN } else { HITBOX_STROKE };
                let color = with_alpha(base, alpha);
                let width = if self.editor.drag().is_dragging_hitbox(id) { 3.0 } else { 2.0 };
                painter.rect_filled(rect, 0.0, with_alpha(base, alpha * 0.15));
                painter.rect_stroke(rect, 0.0, egui::Stroke::new(width, color), egui::StrokeKind::Inside);
                painter.text(
                    rect.min + egui::vec2(4.0, 4.0),
                    egui::Align2::LEFT_TOP,
                    format!("Hitbox: {}", id),
                    egui::FontId::proportional(14.0),
                    color,
                );
            }
        });
    }

    fn detail_panel(&mut self, ctx: &egui::Context, now: Duration) {
        let Some(open) = self.editor.panel().open_id() else {
            return;
        };
        egui::Area::new(egui::Id::new("detail_panel"))
            .fixed_pos(to_pos(self.editor.panel_origin()))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::window(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let handle = ui.add(
                            egui::Label::new(egui::RichText::new("Hitbox Editor Panel").heading())
                                .sense(egui::Sense::click_and_drag()),
                        );
                        if handle.drag_started() {
                            if let Some(press) = ctx.input(|i| i.pointer.press_origin()) {
                                self.editor.pointer_down_on_panel(to_point(press));
                            }
                        }
                        if handle.hovered() && !self.editor.drag().is_active() {
                            ctx.set_cursor_icon(egui::CursorIcon::Grab);
                        }
                        if ui.button("✕").clicked() {
                            self.editor.close_panel();
                        }
                    });
                    ui.separator();

                    if ui.button(format!("Delete Current Hitbox: {}", open)).clicked() {
                        self.editor.remove_open(now);
                    }
                    if ui.button("Delete All Hitboxes").clicked() {
                        self.editor.remove_all();
                    }
                    if ui
                        .button("Reset Hitbox Attributes")
                        .on_hover_text("Resets where the next hitbox is placed")
                        .clicked()
                    {
                        self.editor.reset_placement();
                    }
                    ui.separator();

                    for field in HitboxField::ALL {
                        self.field_row(ui, field);
                    }
                });
            });
    }

    fn field_row(&mut self, ui: &mut egui::Ui, field: HitboxField) {
        let idx = field as usize;
        if self.editing != Some(field) {
            self.drafts[idx] = self.editor.field_value(field).to_string();
        }
        ui.horizontal(|ui| {
            ui.label(format!("{}:", field.label()));
            let resp = ui.add(egui::TextEdit::singleline(&mut self.drafts[idx]).desired_width(70.0));
            if resp.has_focus() {
                self.editing = Some(field);
            }
            if resp.lost_focus() {
                self.editor.set_field(field, &self.drafts[idx]);
                self.editing = None;
            }
            if ui.small_button("−").clicked() {
                self.editor.step_field(field, -1);
            }
            if ui.small_button("+").clicked() {
                self.editor.step_field(field, 1);
            }
            if ui.small_button("⟲").on_hover_text("Reset to default").clicked() {
                self.editor.reset_field(field);
            }
        });
    }
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for HitboxEditApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Duration::from_secs_f64(ctx.input(|i| i.time).max(0.0));

        self.fit_to_monitor(ctx);
        self.editor.tick(now);
        self.ensure_texture(ctx);
        self.shortcuts(ctx, now);

        self.toolbar(ctx, now);
        self.canvas(ctx, now);
        self.detail_panel(ctx, now);
        self.track_pointer(ctx);

        let animator = self.editor.animator();
        if animator.is_animating() {
            ctx.request_repaint();
        } else if let Some(due) = animator.next_due() {
            // Only stale actions are left; wake once to drain them.
            ctx.request_repaint_after(due.saturating_sub(now));
        }
    }
}
