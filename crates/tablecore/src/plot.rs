//! Bar chart rendering to an in-memory PNG

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use once_cell::sync::Lazy;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};

use crate::config;
use crate::error::{AppError, AppResult};
use crate::table::Table;

/// Font family every chart label is drawn with
const FONT_FAMILY: &str = "sans-serif";

/// Share of a row slot covered by its bar group
const GROUP_WIDTH: f64 = 0.8;

const PALETTE: [RGBColor; 8] = [
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Gray
];

/// Whether a font was registered for chart text. Loaded once per process.
static FONT_READY: Lazy<bool> = Lazy::new(register_chart_font);

fn register_chart_font() -> bool {
    let candidates = config::plot::FONT_PATH
        .iter()
        .map(String::as_str)
        .chain(config::plot::FALLBACK_FONT_PATHS.iter().copied());

    for path in candidates {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(_) => continue,
        };
        // register_font needs 'static data; this runs at most once per process.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
            Ok(()) => {
                log::info!("Chart font loaded from {}", path);
                return true;
            }
            Err(_) => log::warn!("Failed to load chart font {}: not a valid TrueType/OpenType font", path),
        }
    }

    log::warn!("No chart font found; charts are rendered without text (set PLOT_FONT_PATH)");
    false
}

fn render_err<E: std::fmt::Display>(err: E) -> AppError {
    AppError::Render(err.to_string())
}

/// One bar series per numeric column
struct Series<'a> {
    name: &'a str,
    values: &'a [Option<f64>],
}

/// Renders `table` as a grouped bar chart and returns PNG bytes.
///
/// Rows become groups along the x axis (labelled by row index), numeric
/// columns become the bars inside each group. Missing values leave a gap.
///
/// # Errors
/// * `AppError::NoNumericColumns` - nothing to plot
/// * `AppError::Render` - drawing or PNG encoding failed
pub fn render_bar_chart(table: &Table) -> AppResult<Vec<u8>> {
    let series: Vec<Series<'_>> = table
        .numeric_columns()
        .filter_map(|column| {
            column.numeric_values().map(|values| Series {
                name: column.name.as_str(),
                values,
            })
        })
        .collect();

    if series.is_empty() || table.row_count() == 0 {
        return Err(AppError::NoNumericColumns);
    }

    let (width, height) = (config::plot::WIDTH, config::plot::HEIGHT);
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    draw_bars(&mut buffer, (width, height), table.row_count(), &series, *FONT_READY)?;

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&buffer, width, height, ExtendedColorType::Rgb8)
        .map_err(render_err)?;
    Ok(png)
}

/// Y axis bounds: the data range padded by 5%, always including zero.
///
/// # Errors
/// `AppError::Render` when the span does not fit in an `f64`; plotters never
/// finishes laying out an infinite axis.
fn y_range(series: &[Series<'_>]) -> AppResult<(f64, f64)> {
    let (mut low, mut high) = (0.0f64, 0.0f64);
    for value in series.iter().flat_map(|s| s.values.iter().flatten()) {
        if value.is_finite() {
            low = low.min(*value);
            high = high.max(*value);
        }
    }
    if low == high {
        return Ok((-1.0, 1.0));
    }
    let pad = (high - low) * 0.05;
    let bounds = (if low < 0.0 { low - pad } else { low }, if high > 0.0 { high + pad } else { high });
    if !(bounds.0.is_finite() && bounds.1.is_finite() && (bounds.1 - bounds.0).is_finite()) {
        return Err(AppError::Render("value range too large to plot".to_string()));
    }
    Ok(bounds)
}

fn draw_bars(
    buffer: &mut [u8],
    size: (u32, u32),
    rows: usize,
    series: &[Series<'_>],
    with_text: bool,
) -> AppResult<()> {
    let root = BitMapBackend::with_buffer(buffer, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let (y_min, y_max) = y_range(series)?;
    let x_range = -0.5f64..(rows as f64 - 0.5);

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if with_text {
        builder
            .caption(config::plot::TITLE, (FONT_FAMILY, 28))
            .x_label_area_size(40)
            .y_label_area_size(70);
    }
    let mut chart = builder.build_cartesian_2d(x_range, y_min..y_max).map_err(render_err)?;

    if with_text {
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(rows.min(30))
            .x_label_formatter(&|x| {
                if x.fract() == 0.0 && *x >= 0.0 {
                    format!("{:.0}", x)
                } else {
                    String::new()
                }
            })
            .label_style((FONT_FAMILY, 14))
            .draw()
            .map_err(render_err)?;
    }

    let bar_width = GROUP_WIDTH / series.len() as f64;
    for (idx, s) in series.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        let offset = -GROUP_WIDTH / 2.0 + idx as f64 * bar_width;
        let bars = s.values.iter().enumerate().filter_map(move |(row, value)| {
            let value = (*value)?;
            if !value.is_finite() {
                return None;
            }
            let x0 = row as f64 + offset;
            Some(Rectangle::new([(x0, 0.0), (x0 + bar_width, value)], color.filled()))
        });

        let drawn = chart.draw_series(bars).map_err(render_err)?;
        if with_text {
            drawn
                .label(s.name)
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }
    }

    chart
        .draw_series(LineSeries::new(vec![(-0.5, 0.0), (rows as f64 - 0.5, 0.0)], &BLACK))
        .map_err(render_err)?;

    if with_text {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT_FAMILY, 14))
            .draw()
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}
