use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints};
use sir_viewer::{DepthAxis, ModelColumn, Snapshot, Stokes};

use crate::state::AppState;

/// One cell of the plot grid.
#[derive(Clone, Copy)]
enum Panel {
    Stokes(Stokes),
    Model(ModelColumn),
}

// ---------------------------------------------------------------------------
// Plot grid (central panel)
// ---------------------------------------------------------------------------

/// Render one plot per selected series, laid out in a near-square grid.
pub fn plot_grid(ui: &mut Ui, state: &AppState) {
    let Some(snapshot) = &state.snapshot else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Select files and press Plot");
        });
        return;
    };

    let panels: Vec<Panel> = snapshot
        .plan
        .stokes
        .iter()
        .map(|s| Panel::Stokes(*s))
        .chain(snapshot.plan.parameters.iter().map(|c| Panel::Model(*c)))
        .collect();
    let (rows, cols) = grid_shape(panels.len());

    let spacing = ui.spacing().item_spacing;
    let cell = egui::vec2(
        (ui.available_width() - spacing.x * (cols as f32 - 1.0)) / cols as f32,
        (ui.available_height() - spacing.y * (rows as f32 - 1.0)) / rows as f32,
    );

    for row in panels.chunks(cols) {
        ui.horizontal(|ui: &mut Ui| {
            for panel in row {
                ui.allocate_ui(cell, |ui: &mut Ui| {
                    ui.vertical(|ui: &mut Ui| match *panel {
                        Panel::Stokes(s) => stokes_plot(ui, state, snapshot, s, cell),
                        Panel::Model(c) => model_plot(ui, state, snapshot, c, cell),
                    });
                });
            }
        });
    }
}

/// Rows and columns for `n` panels; one spare cell is kept for the legend.
fn grid_shape(n: usize) -> (usize, usize) {
    let slots = n + 1;
    let rows = ((slots as f64).sqrt().floor() as usize).max(1);
    let cols = slots.div_ceil(rows);
    (rows, cols)
}

fn entity_color(state: &AppState, name: &str) -> Color32 {
    state
        .color_map
        .as_ref()
        .map(|cm| cm.color_for(name))
        .unwrap_or(Color32::LIGHT_BLUE)
}

fn stokes_plot(ui: &mut Ui, state: &AppState, snapshot: &Snapshot, s: Stokes, cell: egui::Vec2) {
    ui.label(RichText::new(s.title()).strong());

    Plot::new(("stokes", s.title()))
        .legend(Legend::default())
        .width(cell.x)
        .height(cell.y - 24.0)
        .x_axis_label("Δλ")
        .show(ui, |plot_ui| {
            for (_, name, profile) in snapshot.dataset.profiles() {
                let points: PlotPoints = profile
                    .wavelength
                    .iter()
                    .zip(profile.stokes(s))
                    .map(|(&x, &y)| [x, y])
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(name)
                        .color(entity_color(state, name))
                        .width(0.9),
                );
            }
        });
}

fn model_plot(
    ui: &mut Ui,
    state: &AppState,
    snapshot: &Snapshot,
    c: ModelColumn,
    cell: egui::Vec2,
) {
    ui.label(RichText::new(c.title()).strong());

    let dataset = &snapshot.dataset;
    let axis = snapshot.plan.axis;
    let x_col = axis.column();
    // Bounds span every loaded model, including ones skipped on the height
    // axis, so a zero-filled height column still pulls z down to 0.
    let (x_lo, x_hi) = dataset.bounds[x_col];
    let (y_lo, y_hi) = dataset.bounds[c];

    Plot::new(("model", c.title()))
        .legend(Legend::default())
        .width(cell.x)
        .height(cell.y - 24.0)
        .x_axis_label(x_col.title())
        .include_x(x_lo)
        .include_x(x_hi)
        .include_y(y_lo)
        .include_y(y_hi)
        .show(ui, |plot_ui| {
            for (i, name, model) in dataset.models() {
                // Models without a height column have nothing to show on z.
                if axis == DepthAxis::Height && !model.has_height() {
                    continue;
                }
                let color = entity_color(state, name);
                let x = model.column(x_col);
                let y = model.column(c);

                plot_ui.line(
                    Line::new(zip_points(x, y.iter().copied()))
                        .name(name)
                        .color(color)
                        .width(0.9),
                );

                if !snapshot.plan.show_errors {
                    continue;
                }
                if let Some(err) = dataset.error_for(i) {
                    let e = err.column(c);
                    let upper = y.iter().zip(e).map(|(v, d)| v + d);
                    let lower = y.iter().zip(e).map(|(v, d)| v - d);
                    for band in [zip_points(x, upper), zip_points(x, lower)] {
                        plot_ui.line(
                            Line::new(band)
                                .color(color)
                                .width(0.7)
                                .style(LineStyle::dashed_loose()),
                        );
                    }
                }
            }
        });
}

fn zip_points(x: &[f64], y: impl Iterator<Item = f64>) -> PlotPoints {
    x.iter().zip(y).map(|(&x, y)| [x, y]).collect()
}
