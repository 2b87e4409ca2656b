use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use plotters::prelude::*;
use svg2pdf::usvg::{self, fontdb};

use crate::color::{Marker, SeriesStyle};
use crate::data::model::FiniteSizeErrors;

// ---------------------------------------------------------------------------
// Static log-log plot (PDF)
// ---------------------------------------------------------------------------

const PLOT_SIZE: (u32, u32) = (800, 600);
const MARKER_SIZE: i32 = 4;

/// Face every plot label is set in. Bundled so the PDF does not depend on the
/// fonts installed on the machine.
const LABEL_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
const LABEL_FONT_FAMILY: &str = "DejaVu Sans";

/// Render the error series and write them to `path` as a PDF, overwriting it.
pub fn write_pdf(
    errors: &FiniteSizeErrors,
    styles: &[SeriesStyle],
    path: &Path,
) -> Result<()> {
    let svg = render_svg(errors, styles)?;
    let pdf = svg_to_pdf(&svg)?;
    std::fs::write(path, pdf).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote plot to {}", path.display());
    Ok(())
}

/// Draw the log-log chart into an SVG document.
pub fn render_svg(errors: &FiniteSizeErrors, styles: &[SeriesStyle]) -> Result<String> {
    let series: Vec<(SeriesStyle, Vec<(f64, f64)>)> = styles
        .iter()
        .map(|style| (*style, errors.plottable_points(style.observable)))
        .collect();

    for (style, points) in &series {
        let dropped = errors.len() - points.len();
        if dropped > 0 {
            log::debug!(
                "{}: {dropped} point(s) with zero error left off the log axis",
                style.observable.short_name()
            );
        }
    }

    let all_points = || series.iter().flat_map(|(_, pts)| pts.iter().copied());
    let x_range = log_range(all_points().map(|(x, _)| x));
    let y_range = log_range(all_points().map(|(_, y)| y));
    if all_points().next().is_none() {
        log::warn!("No plottable points; drawing empty axes");
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, PLOT_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range.log_scale(), y_range.log_scale())?;

        chart
            .configure_mesh()
            .x_desc("L")
            .y_label_formatter(&|y| format!("{y:.0e}"))
            .draw()?;

        for (style, points) in &series {
            if points.is_empty() {
                continue;
            }
            let color: RGBColor = style.color.into();

            let line_style = color.stroke_width(2);
            let fill = color.filled();
            let labelled = chart
                .draw_series(LineSeries::new(points.iter().copied(), line_style))?
                .label(style.observable.label());

            match style.marker {
                Marker::Circle => {
                    labelled.legend(move |(x, y)| {
                        EmptyElement::at((x + 10, y))
                            + PathElement::new(vec![(-10, 0), (10, 0)], line_style)
                            + Circle::new((0, 0), MARKER_SIZE, fill)
                    });
                    chart.draw_series(points.iter().map(|&p| {
                        EmptyElement::at(p) + Circle::new((0, 0), MARKER_SIZE, fill)
                    }))?;
                }
                Marker::Triangle => {
                    labelled.legend(move |(x, y)| {
                        EmptyElement::at((x + 10, y))
                            + PathElement::new(vec![(-10, 0), (10, 0)], line_style)
                            + Polygon::new(down_triangle(), fill)
                    });
                    chart.draw_series(points.iter().map(|&p| {
                        EmptyElement::at(p) + Polygon::new(down_triangle(), fill)
                    }))?;
                }
            }
        }

        if series.iter().any(|(_, pts)| !pts.is_empty()) {
            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
        }

        root.present()?;
    }
    Ok(svg)
}

/// Pixel offsets of a downward-pointing triangle centred on its anchor.
fn down_triangle() -> Vec<(i32, i32)> {
    let s = MARKER_SIZE + 1;
    vec![(-s, -s * 2 / 3), (s, -s * 2 / 3), (0, s * 4 / 3)]
}

/// usvg options resolving every generic family to the bundled label font.
fn label_font_options() -> Result<usvg::Options<'static>> {
    let mut options = usvg::Options::default();
    options.font_family = LABEL_FONT_FAMILY.to_string();
    let db = options.fontdb_mut();
    db.load_font_data(LABEL_FONT.to_vec());
    db.set_sans_serif_family(LABEL_FONT_FAMILY);
    db.set_serif_family(LABEL_FONT_FAMILY);

    let query = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        ..Default::default()
    };
    if db.query(&query).is_none() {
        bail!("no font face resolves for `{LABEL_FONT_FAMILY}`");
    }
    Ok(options)
}

fn count_text_nodes(group: &usvg::Group) -> usize {
    group
        .children()
        .iter()
        .map(|node| match node {
            usvg::Node::Group(g) => count_text_nodes(g),
            usvg::Node::Text(_) => 1,
            _ => 0,
        })
        .sum()
}

/// Parse the SVG with the label font. usvg silently drops text it has no face
/// for, so a label count mismatch is an error.
fn parse_svg(svg: &str) -> Result<usvg::Tree> {
    let options = label_font_options()?;
    let tree = usvg::Tree::from_str(svg, &options).context("parsing rendered SVG")?;
    let expected = svg.matches("<text").count();
    let kept = count_text_nodes(tree.root());
    if kept < expected {
        bail!(
            "{} of {expected} plot labels could not be set in a font",
            expected - kept
        );
    }
    Ok(tree)
}

fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let tree = parse_svg(svg)?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| anyhow!("converting plot to PDF: {e}"))
}

/// Positive axis range covering `values`, padded by a factor of 1.5 on each side.
/// Falls back to `1..10` when there is nothing to show.
fn log_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return 1.0..10.0;
    }
    lo / 1.5..hi * 1.5
}
