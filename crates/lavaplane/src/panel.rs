//! Debug panel: every slider and checkbox binds directly to live
//! uniform or session state, so edits land on the next frame.

use renderer::{Compositor, FrameStats};

use crate::session::Session;

pub fn draw(
    ctx: &egui::Context,
    session: &mut Session,
    compositor: &mut Compositor,
    stats: &FrameStats,
    wireframe_supported: bool,
) {
    egui::Window::new("Debug")
        .default_width(300.0)
        .default_open(false)
        .show(ctx, |ui| {
            ui.label(format!(
                "{:.0} fps ({:.1} ms)",
                stats.fps(),
                stats.frame_time_ms()
            ));
            ui.separator();

            ui.collapsing("Plane", |ui| {
                ui.add_enabled(
                    wireframe_supported,
                    egui::Checkbox::new(&mut compositor.scene.wireframe, "Wireframe"),
                );

                ui.collapsing("Color", |ui| {
                    if ui.button("Randomize palette").clicked() {
                        session.regenerate_palette();
                        compositor.scene.uniforms.set_palette(&session.palette);
                    }
                    let mut edited = false;
                    for (index, color) in session.palette.colors.iter_mut().enumerate() {
                        let mut rgb = color.to_srgb();
                        ui.horizontal(|ui| {
                            if ui.color_edit_button_rgb(&mut rgb).changed() {
                                color.set_srgb(rgb);
                                edited = true;
                            }
                            ui.label(format!("Color {}", index + 1));
                        });
                    }
                    if edited {
                        compositor.scene.uniforms.set_palette(&session.palette);
                    }
                });
            });

            ui.collapsing("Time", |ui| {
                ui.add(
                    egui::Slider::new(&mut session.speed, 0.0..=5.0)
                        .step_by(0.01)
                        .text("Speed"),
                );
            });

            ui.collapsing("Lava", |ui| {
                let uniforms = &mut compositor.scene.uniforms;
                ui.add(
                    egui::Slider::new(&mut uniforms.noise_coord[0], 0.0..=5.0)
                        .step_by(0.01)
                        .text("Coord X"),
                );
                ui.add(
                    egui::Slider::new(&mut uniforms.noise_coord[1], 0.0..=5.0)
                        .step_by(0.01)
                        .text("Coord Y"),
                );
                ui.add(
                    egui::Slider::new(&mut uniforms.noise_elevation, 0.0..=6.0)
                        .step_by(0.01)
                        .text("Elevation"),
                );
            });

            ui.collapsing("Noise", |ui| {
                ui.checkbox(&mut compositor.grain.enabled, "Enabled");
                let uniforms = &mut compositor.grain.uniforms;
                ui.add(
                    egui::Slider::new(&mut uniforms.size, 0.0..=500.0)
                        .step_by(1.0)
                        .text("Size"),
                );
                ui.add(
                    egui::Slider::new(&mut uniforms.strength, 0.0..=0.1)
                        .step_by(0.001)
                        .text("Strength"),
                );
                ui.add(
                    egui::Slider::new(&mut uniforms.saturation, 0.0..=10.0)
                        .step_by(0.01)
                        .text("Saturation"),
                );
            });
        });
}
