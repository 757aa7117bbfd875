use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;

use crate::backend::mathphysics::Meter;

pub use crate::backend::stats::XWindow;


pub type Dpi          = u32;
pub type Pixel        = u32;
pub type PlottersUnit = f64;


pub const DEFAULT_OUTPUT_DPI: Dpi        = 100;
pub const DEFAULT_SCATTER_SIZE: u32      = 15;
pub const DEFAULT_OUTPUT_FILENAME: &str  = "output.png";
pub const DEFAULT_CONSUME_TIME_FILENAME: &str = "average_consume_time.png";

pub const SAVE_DPI: Dpi = 300;

pub const FIGURE_SIZE_INCHES: (u32, u32)         = (16, 9);
pub const CONSUME_FIGURE_SIZE_INCHES: (u32, u32) = (10, 6);

pub const MAX_TICKS: usize = 6;

const POINTS_PER_INCH: PlottersUnit = 72.0;
const AXIS_MARGIN: PlottersUnit     = 0.05;
const FONT_SIZE_DIVISOR: Pixel      = 60;
const MIN_FONT_SIZE: Pixel          = 8;


#[must_use]
pub fn font_size(plot_resolution: PlotResolution) -> Pixel {
    (plot_resolution.height() / FONT_SIZE_DIVISOR).max(MIN_FONT_SIZE)
}

#[must_use]
pub fn label_font_size(plot_resolution: PlotResolution) -> Pixel {
    (font_size(plot_resolution) * 4 / 5).max(MIN_FONT_SIZE)
}

#[must_use]
pub fn plot_margin(plot_resolution: PlotResolution) -> Pixel {
    font_size(plot_resolution) / 2
}

/// Pixel radius of a scatter marker whose area is `scatter_size` square 
/// points.
#[must_use]
#[allow(clippy::cast_sign_loss)]
#[allow(clippy::cast_possible_truncation)]
pub fn marker_radius(scatter_size: u32, dpi: Dpi) -> Pixel {
    let diameter_in_points = PlottersUnit::from(scatter_size).sqrt();
    let radius = diameter_in_points / 2.0 * PlottersUnit::from(dpi) 
        / POINTS_PER_INCH;

    (radius.round() as Pixel).max(1)
}

/// Tick locations covering `window` on a 1-2-5 step of at least one time
/// step, with the first and last tick replaced by the exact window bounds.
#[must_use]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_possible_truncation)]
pub fn pinned_ticks(window: XWindow, max_ticks: usize) -> Vec<PlottersUnit> {
    let left  = window.left() as PlottersUnit;
    let right = window.right() as PlottersUnit;

    if right <= left {
        return vec![left];
    }

    let intervals = (max_ticks.max(2) - 1) as PlottersUnit;
    let step      = nice_step((right - left) / intervals).max(1.0);
    let first     = (left / step).floor() as i64;
    let last      = (right / step).ceil() as i64;

    let mut ticks: Vec<PlottersUnit> = (first..=last)
        .map(|k| k as PlottersUnit * step)
        .collect();

    if let Some(tick) = ticks.first_mut() {
        *tick = left;
    }
    if let Some(tick) = ticks.last_mut() {
        *tick = right;
    }

    ticks
}

fn nice_step(raw_step: PlottersUnit) -> PlottersUnit {
    let magnitude = 10.0_f64.powf(raw_step.log10().floor());
    let residual  = raw_step / magnitude;

    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

/// Time axis over an [`XWindow`] whose key points are always
/// [`pinned_ticks`], so every panel sharing the window shares its ticks.
#[derive(Clone)]
pub struct PinnedTimeAxis {
    range: RangedCoordf64,
    ticks: Vec<PlottersUnit>,
}

impl PinnedTimeAxis {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(window: XWindow, max_ticks: usize) -> Self {
        let range = window.left() as PlottersUnit..window.right() as PlottersUnit;

        Self {
            range: range.into(),
            ticks: pinned_ticks(window, max_ticks),
        }
    }

    #[must_use]
    pub fn ticks(&self) -> &[PlottersUnit] {
        &self.ticks
    }
}

impl Ranged for PinnedTimeAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = PlottersUnit;

    fn map(&self, value: &PlottersUnit, limit: (i32, i32)) -> i32 {
        self.range.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<PlottersUnit> {
        self.ticks.clone()
    }

    fn range(&self) -> Range<PlottersUnit> {
        self.range.range()
    }
}

/// Points of an indexed series whose step lies in `[left, right]`. The
/// right bound is kept so lines reach the edge of the axis.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn window_points<I>(
    points: I,
    window: XWindow
) -> Vec<(PlottersUnit, PlottersUnit)>
where
    I: IntoIterator<Item = (usize, PlottersUnit)>
{
    points
        .into_iter()
        .filter(|(step, _)| (window.left()..=window.right()).contains(step))
        .map(|(step, value)| (step as PlottersUnit, value))
        .collect()
}

/// Autoscaled axis range with a 5% margin on both sides. Non-finite values
/// are ignored.
#[must_use]
pub fn value_range<I>(values: I) -> Range<PlottersUnit> 
where
    I: IntoIterator<Item = PlottersUnit>
{
    let (min, max) = values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold((PlottersUnit::INFINITY, PlottersUnit::NEG_INFINITY), 
            |(min, max), value| (min.min(value), max.max(value))
        );

    if min > max {
        return 0.0..1.0;
    }

    let span = max - min;
    let pad  = if span > 0.0 {
        span * AXIS_MARGIN
    } else if min != 0.0 {
        min.abs() * AXIS_MARGIN
    } else {
        0.5
    };

    (min - pad)..(max + pad)
}

/// Offset and size of the largest box inside `available` whose plotting 
/// part (the box minus the label areas) keeps one meter equally long on 
/// both axes. The box is centered.
#[must_use]
#[allow(clippy::cast_sign_loss)]
#[allow(clippy::cast_possible_truncation)]
pub fn equal_aspect_box(
    available: (Pixel, Pixel),
    label_areas: (Pixel, Pixel),
    axes_ranges: &Axes2DRanges,
) -> ((Pixel, Pixel), (Pixel, Pixel)) {
    let (width, height) = available;
    let (y_label_width, x_label_height) = label_areas;

    let plot_width  = PlottersUnit::from(width.saturating_sub(y_label_width));
    let plot_height = PlottersUnit::from(height.saturating_sub(x_label_height));
    let x_span = axes_ranges.width();
    let y_span = axes_ranges.height();

    if x_span <= 0.0 || y_span <= 0.0 || plot_width <= 0.0 || plot_height <= 0.0 {
        return ((0, 0), available);
    }

    let scale = (plot_width / x_span).min(plot_height / y_span);
    let box_width  = ((x_span * scale).round() as Pixel + y_label_width)
        .min(width);
    let box_height = ((y_span * scale).round() as Pixel + x_label_height)
        .min(height);

    (
        ((width - box_width) / 2, (height - box_height) / 2),
        (box_width, box_height)
    )
}


#[derive(Debug, Clone, PartialEq)]
pub struct Axes2DRanges {
    x: Range<PlottersUnit>,
    y: Range<PlottersUnit>,
}

impl Axes2DRanges {
    #[must_use]
    pub fn new(x: Range<PlottersUnit>, y: Range<PlottersUnit>) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn from_meters(x: (Meter, Meter), y: (Meter, Meter)) -> Self {
        Self {
            x: PlottersUnit::from(x.0)..PlottersUnit::from(x.1),
            y: PlottersUnit::from(y.0)..PlottersUnit::from(y.1),
        }
    }

    #[must_use]
    pub fn x(&self) -> Range<PlottersUnit> {
        self.x.clone()
    }
    
    #[must_use]
    pub fn y(&self) -> Range<PlottersUnit> {
        self.y.clone()
    }

    #[must_use]
    pub fn width(&self) -> PlottersUnit {
        self.x.end - self.x.start
    }
    
    #[must_use]
    pub fn height(&self) -> PlottersUnit {
        self.y.end - self.y.start
    }
}

impl Default for Axes2DRanges {
    fn default() -> Self {
        Self {
            x: 0.0..1_000.0,
            y: 0.0..1_000.0,
        }
    }
}


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlotResolution {
    width: Pixel,
    height: Pixel
}

impl PlotResolution {
    #[must_use]
    pub fn new(width: Pixel, height: Pixel) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn from_figure_size(size_in_inches: (u32, u32), dpi: Dpi) -> Self {
        Self {
            width: size_in_inches.0 * dpi,
            height: size_in_inches.1 * dpi,
        }
    }

    #[must_use]
    pub fn width(&self) -> Pixel {
        self.width
    }
    
    #[must_use]
    pub fn height(&self) -> Pixel {
        self.height
    }

    #[must_use]
    pub fn rgb_buffer_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

impl From<PlotResolution> for (Pixel, Pixel) {
    fn from(plot_resolution: PlotResolution) -> Self {
        (plot_resolution.width(), plot_resolution.height())
    }
}


#[derive(Clone, Debug, PartialEq)]
pub struct DisplayOptions {
    output_dpi: Dpi,
    scatter_size: u32,
    output_filename: PathBuf,
}

impl DisplayOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set_output_dpi(mut self, output_dpi: Dpi) -> Self {
        self.output_dpi = output_dpi;
        self
    }
    
    #[must_use]
    pub fn set_scatter_size(mut self, scatter_size: u32) -> Self {
        self.scatter_size = scatter_size;
        self
    }

    #[must_use]
    pub fn set_output_filename<P: AsRef<Path>>(
        mut self, 
        output_filename: P
    ) -> Self {
        self.output_filename = output_filename.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn output_dpi(&self) -> Dpi {
        self.output_dpi
    }
    
    #[must_use]
    pub fn scatter_size(&self) -> u32 {
        self.scatter_size
    }

    #[must_use]
    pub fn output_filename(&self) -> &Path {
        &self.output_filename
    }

    /// Animated output of the live mode, next to the still image.
    #[must_use]
    pub fn live_filename(&self) -> PathBuf {
        self.output_filename.with_extension("gif")
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            output_dpi: DEFAULT_OUTPUT_DPI,
            scatter_size: DEFAULT_SCATTER_SIZE,
            output_filename: PathBuf::from(DEFAULT_OUTPUT_FILENAME),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figure_resolution_follows_dpi() {
        assert_eq!(
            PlotResolution::new(1_600, 900),
            PlotResolution::from_figure_size(FIGURE_SIZE_INCHES, 100)
        );
        assert_eq!(
            4_800 * 2_700 * 3,
            PlotResolution::from_figure_size(FIGURE_SIZE_INCHES, SAVE_DPI)
                .rgb_buffer_len()
        );
    }

    #[test]
    fn marker_radius_scales_with_dpi() {
        assert_eq!(3, marker_radius(15, 100));
        assert_eq!(8, marker_radius(15, 300));
        assert_eq!(1, marker_radius(0, 100));
    }

    #[test]
    fn ticks_are_pinned_to_window_bounds() {
        assert_eq!(
            vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0],
            pinned_ticks(XWindow::new(0, 100), MAX_TICKS)
        );
        assert_eq!(
            vec![3.0, 20.0, 40.0, 60.0, 80.0, 97.0],
            pinned_ticks(XWindow::new(3, 97), MAX_TICKS)
        );
    }

    #[test]
    fn narrow_window_ticks_every_step() {
        assert_eq!(
            vec![0.0, 1.0, 2.0, 3.0],
            pinned_ticks(XWindow::new(0, 3), MAX_TICKS)
        );
        assert_eq!(
            vec![7.0, 8.0],
            pinned_ticks(XWindow::new(7, 8), MAX_TICKS)
        );
    }

    #[test]
    fn time_axis_uses_pinned_ticks() {
        let window = XWindow::new(3, 97);
        let axis = PinnedTimeAxis::new(window, MAX_TICKS);

        assert_eq!(pinned_ticks(window, MAX_TICKS), axis.key_points(3_usize));
        assert_eq!(axis.ticks(), axis.key_points(100_usize).as_slice());
        assert_eq!(3.0..97.0, axis.range());
        assert_eq!(0, axis.map(&3.0, (0, 940)));
        assert_eq!(940, axis.map(&97.0, (0, 940)));
    }

    #[test]
    fn degenerate_window_has_single_tick() {
        assert_eq!(vec![5.0], pinned_ticks(XWindow::new(5, 5), MAX_TICKS));
    }

    #[test]
    fn window_points_include_right_bound() {
        let series = [0.5, 0.6, 0.7, 0.8, 0.9];

        assert_eq!(
            vec![(1.0, 0.6), (2.0, 0.7), (3.0, 0.8)],
            window_points(series.iter().copied().enumerate(), XWindow::new(1, 3))
        );
        assert!(
            window_points(series.iter().copied().enumerate(), XWindow::new(7, 9))
                .is_empty()
        );
    }

    #[test]
    fn value_range_has_margins() {
        assert_eq!(-0.5..10.5, value_range([0.0, 10.0, 4.0]));
        assert_eq!(0.0..1.0, value_range(std::iter::empty()));
        assert_eq!(0.0..1.0, value_range([f64::NAN]));
        assert_eq!(-0.5..0.5, value_range([0.0, 0.0]));

        let flat = value_range([2.0, 2.0]);
        assert!(flat.start < 2.0 && flat.end > 2.0);
    }

    #[test]
    fn equal_aspect_box_is_centered() {
        let square = Axes2DRanges::new(0.0..100.0, 0.0..100.0);

        assert_eq!(
            ((100, 0), (300, 300)),
            equal_aspect_box((500, 300), (0, 0), &square)
        );
        assert_eq!(
            ((85, 0), (330, 300)),
            equal_aspect_box((500, 300), (50, 20), &square)
        );
    }

    #[test]
    fn equal_aspect_box_keeps_degenerate_ranges() {
        let flat = Axes2DRanges::new(0.0..100.0, 5.0..5.0);

        assert_eq!(
            ((0, 0), (500, 300)),
            equal_aspect_box((500, 300), (0, 0), &flat)
        );
    }

    #[test]
    fn live_output_is_a_gif() {
        let options = DisplayOptions::new().set_output_filename("run/map.png");

        assert_eq!(PathBuf::from("run/map.gif"), options.live_filename());
        assert_eq!(DEFAULT_SCATTER_SIZE, options.scatter_size());
    }
}
