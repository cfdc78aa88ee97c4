// ui.rs - Window controls and per-frame drawing for the grid app

use std::time::Instant;

use eframe::egui;
use egui::Vec2;

use crate::painter_surface::PainterSurface;
use crate::settings::{self, PolicyKind};
use crate::GridApp;

impl eframe::App for GridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Tick the policy once per interval; draw below sees all of this frame's mutations
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            if let Err(err) = self.step() {
                log::error!("update failed: {err}");
                self.is_running = false;
            }
            self.last_update = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.last_update = Instant::now();
                    }
                }

                if ui.button("⏹ Clear").clicked() {
                    self.is_running = false;
                    if let Err(err) = self.rebuild_policy() {
                        log::error!("clear failed: {err}");
                    }
                }

                ui.separator();

                ui.label("Policy:");
                let before = self.policy_kind;
                egui::ComboBox::from_id_source("policy_selector")
                    .selected_text(self.policy_kind.label())
                    .show_ui(ui, |ui| {
                        for kind in [PolicyKind::FullClear, PolicyKind::Decay] {
                            ui.selectable_value(&mut self.policy_kind, kind, kind.label());
                        }
                    });
                if self.policy_kind != before {
                    if let Err(err) = self.rebuild_policy() {
                        log::error!("could not switch policy: {err}");
                    }
                }

                ui.separator();
                ui.label(format!("Frame: {}", self.frame));
            });

            ui.horizontal(|ui| {
                let mut changed = ui
                    .add(egui::Slider::new(&mut self.dots_per_frame, 0..=5000).text("dots/frame"))
                    .changed();
                let decay = ui.add_enabled(
                    self.policy_kind == PolicyKind::Decay,
                    egui::Slider::new(&mut self.decay_probability, 0.0..=1.0).text("decay"),
                );
                changed |= decay.changed();
                if changed {
                    self.apply_knobs();
                }
            });

            ui.separator();

            let size = Vec2::new(settings::WINDOW_WIDTH as f32, settings::WINDOW_HEIGHT as f32);
            let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
            if let Err(err) = self.grid.draw(&mut PainterSurface::new(&painter, response.rect)) {
                log::error!("draw failed: {err}");
            }

            ui.separator();

            ui.horizontal(|ui| {
                let painted = self.grid.store().map(|s| s.painted_count()).unwrap_or(0);
                ui.label(format!("Painted cells: {painted}"));
                if let Some(tracked) = self.tracked() {
                    ui.label(format!("Tracked: {tracked}"));
                }
                ui.label(format!("Policy: {}", self.policy_name()));
            });
        });

        if self.is_running {
            ctx.request_repaint();
        }
    }
}

impl GridApp {
    fn apply_knobs(&mut self) {
        if let Err(err) = self.tune_policy() {
            log::error!("could not apply settings: {err}");
        }
    }
}
