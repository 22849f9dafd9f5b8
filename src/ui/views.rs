use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points,
};

use crate::analysis::correlation::{CategoryScatter, CorrelationMatrix, PairPlot};
use crate::analysis::distribution::{GroupStats, Histogram};
use crate::analysis::frequency::ValueCounts;
use crate::analysis::ztest::ZTestReport;
use crate::analysis::AnalysisError;
use crate::color::{diverging_color, generate_palette, ColorMap};
use crate::data::model::VehicleDataset;
use crate::state::AppState;

const PREVIEW_ROWS: usize = 5;
const ACCENT: Color32 = Color32::from_rgb(90, 140, 220);
const OK_GREEN: Color32 = Color32::from_rgb(70, 160, 90);
const WARN_AMBER: Color32 = Color32::from_rgb(200, 150, 40);

// ---------------------------------------------------------------------------
// The fixed view sequence (central panel)
// ---------------------------------------------------------------------------

/// Render the whole analysis session: overview, the ten views in fixed
/// order, then the completion line.
pub fn analysis_column(ui: &mut Ui, state: &AppState) {
    let (Some(dataset), Some(report)) = (&state.dataset, &state.report) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a spreadsheet to analyse it  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            overview(ui, dataset);

            section(ui, "1. Top 10 Electric Vehicle Makes");
            bar_counts(ui, "top_makes", &report.top_makes, "Vehicles");

            section(ui, "2. Electric Range Distribution");
            histogram_plot(ui, "range_hist", &report.range_histogram, "Electric Range");

            section(ui, "3. Pairwise Numeric Relationships");
            pair_grid(ui, &report.pair_plot);

            section(ui, "4. Electric Range by Vehicle Type");
            box_groups(ui, "range_by_type", &report.range_by_type, "Electric Range");

            section(ui, "5. Correlation Matrix");
            correlation_grid(ui, &report.correlation);

            section(ui, "6. Electric Range vs Model Year");
            category_scatter_plot(ui, "range_vs_year", &report.range_vs_year);

            section(ui, "7. Z-Test: BEV vs PHEV Electric Range");
            ztest_section(ui, &report.range_test);

            section(ui, "8. EV Count by Model Year");
            year_bar(ui, "year_counts", &report.year_counts);

            section(ui, "9. Electric Range by Top Makes");
            box_groups(
                ui,
                "range_by_make",
                &report.range_by_top_makes,
                "Electric Range",
            );

            section(ui, "10. CAFV Eligibility Status");
            bar_counts(ui, "cafv", &report.cafv_counts, "Vehicles");

            ui.add_space(12.0);
            ui.label(RichText::new("Analysis complete.").color(OK_GREEN).strong());
            ui.add_space(16.0);
        });
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(16.0);
    ui.heading(title);
    ui.separator();
}

// ---------------------------------------------------------------------------
// Overview: shape + preview table
// ---------------------------------------------------------------------------

fn overview(ui: &mut Ui, dataset: &VehicleDataset) {
    section(ui, "Dataset Overview");
    ui.label(format!(
        "Shape: {} rows × {} columns",
        dataset.n_rows(),
        dataset.n_cols()
    ));
    ui.add_space(6.0);

    ScrollArea::horizontal()
        .id_salt("preview_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .columns(Column::auto().at_least(70.0), dataset.n_cols())
                .header(22.0, |mut header| {
                    for col in &dataset.columns {
                        header.col(|ui| {
                            ui.strong(col);
                        });
                    }
                })
                .body(|body| {
                    let shown = dataset.n_rows().min(PREVIEW_ROWS);
                    body.rows(20.0, shown, |mut row| {
                        let r = row.index();
                        for cell in &dataset.rows[r] {
                            row.col(|ui| {
                                ui.label(cell.to_string());
                            });
                        }
                    });
                });
        });
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// Categorical bar chart: one bar per label at integer positions, axis
/// ticks showing the labels.
fn bar_counts(ui: &mut Ui, id: &str, counts: &ValueCounts, y_label: &str) {
    let palette = generate_palette(counts.len());
    let bars: Vec<Bar> = counts
        .entries
        .iter()
        .zip(&palette)
        .enumerate()
        .map(|(i, ((label, n), color))| {
            Bar::new(i as f64, *n as f64)
                .width(0.7)
                .fill(*color)
                .name(label)
        })
        .collect();

    let labels: Vec<String> = counts
        .entries
        .iter()
        .map(|(label, _)| short_label(label, 16))
        .collect();

    Plot::new(id.to_string())
        .height(260.0)
        .y_axis_label(y_label)
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() < 1e-3 && i >= 0.0 && (i as usize) < labels.len() {
                labels[i as usize].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Numeric bar chart of counts per Model Year, bars at the year values.
fn year_bar(ui: &mut Ui, id: &str, years: &[(f64, usize)]) {
    let bars: Vec<Bar> = years
        .iter()
        .map(|&(year, n)| {
            Bar::new(year, n as f64)
                .width(0.8)
                .fill(ACCENT)
                .name(format!("{year:.0}"))
        })
        .collect();

    Plot::new(id.to_string())
        .height(260.0)
        .x_axis_label("Model Year")
        .y_axis_label("Vehicles")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Histogram + density overlay
// ---------------------------------------------------------------------------

fn histogram_plot(ui: &mut Ui, id: &str, hist: &Histogram, x_label: &str) {
    let bars: Vec<Bar> = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            Bar::new(hist.bin_center(i), count as f64)
                .width(hist.bin_width)
                .fill(ACCENT)
        })
        .collect();

    // The KDE is in density units; scale it into count space so the
    // curve overlays the bars.
    let scale = hist.n as f64 * hist.bin_width;
    let curve: PlotPoints = hist
        .density
        .iter()
        .map(|&[x, d]| [x, d * scale])
        .collect();
    let has_curve = !hist.density.is_empty();

    Plot::new(id.to_string())
        .height(280.0)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label("Count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Count"));
            if has_curve {
                plot_ui.line(Line::new(curve).color(WARN_AMBER).width(2.0).name("Density"));
            }
        });
}

// ---------------------------------------------------------------------------
// Pair plot grid
// ---------------------------------------------------------------------------

fn pair_grid(ui: &mut Ui, pp: &PairPlot) {
    if pp.rows.is_empty() {
        ui.label("No rows with all three numeric values present.");
        return;
    }

    egui::Grid::new("pair_grid").spacing([8.0, 8.0]).show(ui, |ui: &mut Ui| {
        for i in 0..3 {
            for j in 0..3 {
                let mut plot = Plot::new(format!("pair_{i}_{j}"))
                    .width(250.0)
                    .height(190.0);
                if i == 2 {
                    plot = plot.x_axis_label(pp.labels[j]);
                }
                if j == 0 {
                    plot = plot.y_axis_label(pp.labels[i]);
                }

                if i == j {
                    let hist = &pp.histograms[i];
                    let bars: Vec<Bar> = hist
                        .counts
                        .iter()
                        .enumerate()
                        .map(|(b, &count)| {
                            Bar::new(hist.bin_center(b), count as f64)
                                .width(hist.bin_width)
                                .fill(ACCENT)
                        })
                        .collect();
                    plot.show(ui, |plot_ui| {
                        plot_ui.bar_chart(BarChart::new(bars));
                    });
                } else {
                    let points: PlotPoints =
                        pp.rows.iter().map(|r| [r[j], r[i]]).collect();
                    plot.show(ui, |plot_ui| {
                        plot_ui.points(Points::new(points).radius(1.5).color(ACCENT));
                    });
                }
            }
            ui.end_row();
        }
    });
}

// ---------------------------------------------------------------------------
// Box plots
// ---------------------------------------------------------------------------

fn box_groups(ui: &mut Ui, id: &str, groups: &[GroupStats], y_label: &str) {
    if groups.is_empty() {
        ui.label("No groups with usable values.");
        return;
    }

    let palette = generate_palette(groups.len());
    let boxes: Vec<BoxElem> = groups
        .iter()
        .zip(&palette)
        .enumerate()
        .map(|(i, (g, color))| {
            BoxElem::new(
                i as f64,
                BoxSpread::new(g.min, g.q1, g.median, g.q3, g.max),
            )
            .name(&g.label)
            .fill(color.gamma_multiply(0.35))
            .box_width(0.5)
        })
        .collect();

    let labels: Vec<String> = groups
        .iter()
        .map(|g| short_label(&g.label, 16))
        .collect();

    Plot::new(id.to_string())
        .height(280.0)
        .y_axis_label(y_label)
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() < 1e-3 && i >= 0.0 && (i as usize) < labels.len() {
                labels[i as usize].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
        });
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

fn correlation_grid(ui: &mut Ui, matrix: &CorrelationMatrix) {
    egui::Grid::new("corr_grid")
        .spacing([10.0, 6.0])
        .min_col_width(110.0)
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for label in matrix.labels {
                ui.strong(label);
            }
            ui.end_row();

            for (i, row) in matrix.coefficients.iter().enumerate() {
                ui.strong(matrix.labels[i]);
                for entry in row {
                    match entry {
                        Some(r) => {
                            let bg = diverging_color(*r);
                            let fg = if r.abs() > 0.6 {
                                Color32::WHITE
                            } else {
                                Color32::BLACK
                            };
                            ui.label(
                                RichText::new(format!("  {r:.2}  "))
                                    .monospace()
                                    .background_color(bg)
                                    .color(fg),
                            );
                        }
                        // Undefined pair (no overlap or zero variance).
                        None => {
                            ui.label("—");
                        }
                    }
                }
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Category-colored scatter
// ---------------------------------------------------------------------------

fn category_scatter_plot(ui: &mut Ui, id: &str, scatter: &CategoryScatter) {
    let color_map = ColorMap::new(scatter.groups.iter().map(|(label, _)| label.as_str()));

    Plot::new(id.to_string())
        .height(300.0)
        .legend(Legend::default())
        .x_axis_label(scatter.x_label)
        .y_axis_label(scatter.y_label)
        .show(ui, |plot_ui| {
            for (label, points) in &scatter.groups {
                plot_ui.points(
                    Points::new(PlotPoints::from(points.clone()))
                        .radius(2.0)
                        .color(color_map.color_for(label))
                        .name(label),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Z-test report
// ---------------------------------------------------------------------------

fn ztest_section(ui: &mut Ui, result: &Result<ZTestReport, AnalysisError>) {
    match result {
        Ok(report) => {
            ui.label(format!(
                "{} mean range: {:.2}   (n = {})",
                report.first_label, report.first.mean, report.first.n
            ));
            ui.label(format!(
                "{} mean range: {:.2}   (n = {})",
                report.second_label, report.second.mean, report.second.n
            ));
            ui.label(format!("Z-score: {:.4}", report.z));
            ui.label(format!("P-value: {:.4}", report.p));
            ui.add_space(4.0);

            if report.significant() {
                ui.label(
                    RichText::new("Statistically significant difference between BEVs and PHEVs.")
                        .color(OK_GREEN)
                        .strong(),
                );
            } else {
                ui.label(
                    RichText::new("No statistically significant difference found.")
                        .color(WARN_AMBER)
                        .strong(),
                );
            }
        }
        Err(e) => {
            ui.colored_label(Color32::RED, format!("Z-test unavailable: {e}"));
        }
    }
}

// ---------------------------------------------------------------------------

fn short_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut shortened: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_labels_are_shortened_on_a_char_boundary() {
        assert_eq!(short_label("Tesla", 16), "Tesla");
        assert_eq!(
            short_label("Clean Alternative Fuel Vehicle Eligible", 16),
            "Clean Alternati…"
        );
    }
}
