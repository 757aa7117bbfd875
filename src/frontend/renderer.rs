use std::collections::BTreeMap;
use std::path::PathBuf;

use log::{debug, info};
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::RGBColor;
use rand::Rng;
use thiserror::Error;

use crate::backend::client::Client;
use crate::backend::mathphysics::format_bps;
use crate::backend::station::{BaseStation, BaseStationId};
use crate::backend::stats::{Statistics, SummaryTable};

use super::WINDOW_TITLE;
use super::player::{FrameClock, LivePlayer};
use super::viewer::FigureViewer;

use layout::{legend_slots, summary_cells, DashboardPanels, LEGEND_COLUMNS};
use primitives::{
    bright_colors, coverage_primitive, legend_entries, marker_element,
    PixelOffset
};

pub use consume::{plot_average_consume_time, ConsumeTimeSeries};
pub use layout::{column_widths, Panel, GRID_ROWS, WIDTH_RATIOS};
pub use plotcfg::{
    Axes2DRanges, Dpi, DisplayOptions, PinnedTimeAxis, Pixel, PlotResolution,
    PlottersUnit, XWindow, DEFAULT_CONSUME_TIME_FILENAME, DEFAULT_OUTPUT_DPI,
    DEFAULT_OUTPUT_FILENAME, DEFAULT_SCATTER_SIZE, FIGURE_SIZE_INCHES,
    SAVE_DPI
};
pub use primitives::{LegendEntry, MarkerShape, MARKERS, UNCONNECTED_COLOR};

use plotcfg::{
    equal_aspect_box, font_size, label_font_size, marker_radius, plot_margin,
    value_range, window_points, MAX_TICKS
};


mod consume;
mod layout;
mod plotcfg;
mod primitives;


type MapChartContext<'a, DB> = ChartContext<
    'a,
    DB,
    Cartesian2d<RangedCoordf64, RangedCoordf64>
>;

type TimeSeriesChartContext<'a, DB> = ChartContext<
    'a,
    DB,
    Cartesian2d<PinnedTimeAxis, RangedCoordf64>
>;

type SeriesPoints = Vec<(PlottersUnit, PlottersUnit)>;


const FONT: &str = "sans-serif";

const LEGEND_BAND_DIVISOR: Pixel = 10;
const LEGEND_SAMPLE_LENGTH: i32  = 20;
const LINE_WIDTH: u32            = 2;
const LEGEND_BACKGROUND_ALPHA: f64 = 0.8;

const ANOMALY_COLOR: RGBColor = RED;
const LEGEND_SWATCH_COLOR: RGBColor = BLACK;


/// Bounding box of every coverage circle, `None` without stations.
#[must_use]
pub fn coverage_limits(base_stations: &[BaseStation]) -> Option<Axes2DRanges> {
    let (first, rest) = base_stations.split_first()?;
    let (mut lower, mut upper) = first.coverage().bounds();

    for base_station in rest {
        let (station_lower, station_upper) = base_station.coverage().bounds();

        lower.x = lower.x.min(station_lower.x);
        lower.y = lower.y.min(station_lower.y);
        upper.x = upper.x.max(station_upper.x);
        upper.y = upper.y.max(station_upper.y);
    }

    Some(Axes2DRanges::from_meters((lower.x, upper.x), (lower.y, upper.y)))
}

fn line_color(index: usize) -> RGBAColor {
    Palette99::pick(index).to_rgba()
}

fn legend_line(color: RGBAColor) -> impl Fn(PixelOffset) -> PathElement<PixelOffset> {
    move |(x, y)| PathElement::new(
        vec![(x, y), (x + LEGEND_SAMPLE_LENGTH, y)],
        color.stroke_width(LINE_WIDTH)
    )
}


#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Drawing failed with error `{0}`")]
    Drawing(String),
    #[error("Image output failed with error `{0}`")]
    Image(#[from] image::ImageError),
    #[error("Failed to set the interrupt handler: {0}")]
    Interrupt(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for RenderError
where
    E: std::error::Error + Send + Sync
{
    fn from(error: DrawingAreaErrorKind<E>) -> Self {
        Self::Drawing(error.to_string())
    }
}


/// Dashboard renderer bound to the base stations and clients of one
/// simulation run.
///
/// Every draw operation takes the drawing area it renders on, so the same
/// graph can draw into a PNG file, a GIF animation or an in-memory buffer.
pub struct Graph<'a> {
    base_stations: &'a [BaseStation],
    clients: &'a [Client],
    xlim: XWindow,
    map_limits: Axes2DRanges,
    options: DisplayOptions,
    station_colors: BTreeMap<BaseStationId, RGBColor>,
}

impl<'a> Graph<'a> {
    #[must_use]
    pub fn new(
        base_stations: &'a [BaseStation],
        clients: &'a [Client],
        xlim: XWindow,
        map_limits: Axes2DRanges,
        options: DisplayOptions,
    ) -> Self {
        Self::with_rng(
            base_stations,
            clients,
            xlim,
            map_limits,
            options,
            &mut rand::rng()
        )
    }

    /// Same as [`Graph::new`] with the station colors drawn from `rng`.
    #[must_use]
    pub fn with_rng<R: Rng + ?Sized>(
        base_stations: &'a [BaseStation],
        clients: &'a [Client],
        xlim: XWindow,
        map_limits: Axes2DRanges,
        options: DisplayOptions,
        rng: &mut R,
    ) -> Self {
        let colors = bright_colors(base_stations.len(), rng);
        let station_colors: BTreeMap<BaseStationId, RGBColor> = base_stations
            .iter()
            .map(BaseStation::id)
            .zip(colors)
            .collect();

        debug!(
            "Assigned colors to {} base stations",
            station_colors.len()
        );

        Self {
            base_stations,
            clients,
            xlim,
            map_limits,
            options,
            station_colors,
        }
    }

    #[must_use]
    pub fn station_colors(&self) -> &BTreeMap<BaseStationId, RGBColor> {
        &self.station_colors
    }

    #[must_use]
    pub fn station_color(&self, base_station: BaseStationId) -> Option<RGBColor> {
        self.station_colors.get(&base_station).copied()
    }

    /// Color of the connected station, gray for unconnected clients.
    #[must_use]
    pub fn client_color(&self, client: &Client) -> RGBColor {
        client
            .base_station()
            .and_then(|base_station| self.station_color(base_station))
            .unwrap_or(UNCONNECTED_COLOR)
    }

    #[must_use]
    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    #[must_use]
    pub fn xlim(&self) -> XWindow {
        self.xlim
    }

    #[must_use]
    pub fn map_limits(&self) -> &Axes2DRanges {
        &self.map_limits
    }

    #[must_use]
    pub fn figure_resolution(&self, dpi: Dpi) -> PlotResolution {
        PlotResolution::from_figure_size(FIGURE_SIZE_INCHES, dpi)
    }

    /// # Errors
    ///
    /// Will return `Err` if the map panel could not be drawn.
    pub fn draw_map<DB: DrawingBackend>(
        &self,
        figure: &DrawingArea<DB, Shift>
    ) -> Result<(), RenderError> {
        let resolution = figure_resolution_of(figure);
        let font       = font_size(resolution);
        let label_font = label_font_size(resolution);
        let margin     = plot_margin(resolution);
        let radius     = marker_radius(
            self.options.scatter_size(),
            figure_dpi(resolution)
        );

        let panels = DashboardPanels::split(figure);
        let (_, map_height) = panels.map().dim_in_pixel();
        let (plot_area, legend_area) = panels
            .map()
            .split_vertically(map_height - map_height / LEGEND_BAND_DIVISOR);

        let x_label_area = font * 2;
        let y_label_area = font * 4;
        let (offset, size) = equal_aspect_box(
            plot_area.dim_in_pixel(),
            (y_label_area + 2 * margin, x_label_area + 2 * margin),
            &self.map_limits
        );
        let plot_area = plot_area.shrink(offset, size);

        let mut chart_context = ChartBuilder::on(&plot_area)
            .margin(margin)
            .x_label_area_size(x_label_area)
            .y_label_area_size(y_label_area)
            .build_cartesian_2d(self.map_limits.x(), self.map_limits.y())?;

        chart_context
            .configure_mesh()
            .disable_mesh()
            .x_label_formatter(&|x| format!("{x:.0} m"))
            .y_label_formatter(&|y| format!("{y:.0} m"))
            .label_style((FONT, label_font))
            .draw()?;

        self.draw_coverages(&mut chart_context)?;
        self.draw_clients(&mut chart_context, radius)?;
        self.draw_map_legend(&legend_area, radius, label_font)
    }

    fn draw_coverages<'b, DB: DrawingBackend + 'b>(
        &self,
        chart_context: &mut MapChartContext<'b, DB>
    ) -> Result<(), RenderError> {
        let coverage_primitives = self.base_stations
            .iter()
            .map(|base_station|
                coverage_primitive(
                    base_station.coverage(),
                    self.station_color(base_station.id())
                        .unwrap_or(UNCONNECTED_COLOR)
                )
            );

        chart_context.draw_series(coverage_primitives)?;

        Ok(())
    }

    fn draw_clients<'b, DB: DrawingBackend + 'b>(
        &self,
        chart_context: &mut MapChartContext<'b, DB>,
        radius: Pixel
    ) -> Result<(), RenderError> {
        let plotting_area = chart_context.plotting_area();

        for client in self.clients {
            plotting_area.draw(&marker_element(
                <(PlottersUnit, PlottersUnit)>::from(client.position()),
                MarkerShape::for_slice(client.subscribed_slice_index()),
                radius,
                self.client_color(client)
            ))?;
        }

        Ok(())
    }

    fn draw_map_legend<DB: DrawingBackend>(
        &self,
        legend_area: &DrawingArea<DB, Shift>,
        radius: Pixel,
        label_font: Pixel,
    ) -> Result<(), RenderError> {
        let entries = legend_entries(self.clients);
        let slots   = legend_slots(
            entries.len(),
            legend_area.dim_in_pixel(),
            LEGEND_COLUMNS
        );
        let text_style = TextStyle::from((FONT, label_font))
            .pos(Pos::new(HPos::Left, VPos::Center));
        #[allow(clippy::cast_possible_wrap)]
        let radius_offset = radius as i32;

        for (entry, (x, y)) in entries.iter().zip(slots) {
            let marker_x = x + 2 * radius_offset;

            legend_area.draw(&marker_element(
                (marker_x, y),
                entry.marker(),
                radius,
                LEGEND_SWATCH_COLOR
            ))?;
            legend_area.draw(&Text::new(
                entry.label().to_string(),
                (marker_x + 2 * radius_offset + LEGEND_SAMPLE_LENGTH / 4, y),
                text_style.clone()
            ))?;
        }

        Ok(())
    }

    /// # Errors
    ///
    /// Will return `Err` if one of the statistics panels could not be
    /// drawn.
    pub fn draw_stats<DB: DrawingBackend>(
        &self,
        figure: &DrawingArea<DB, Shift>,
        statistics: &Statistics,
    ) -> Result<(), RenderError> {
        let panels = DashboardPanels::split(figure);
        let resolution = figure_resolution_of(figure);

        self.draw_line_panel(
            panels.panel(Panel::ConnectedRatio),
            Panel::ConnectedRatio,
            &[self.indexed_window(&statistics.connected_ratio)],
            &|y| format!("{y:.2}"),
            resolution,
        )?;
        self.draw_line_panel(
            panels.panel(Panel::BandwidthUsage),
            Panel::BandwidthUsage,
            &[self.indexed_window(&statistics.bandwidth_usage)],
            &|y| format_bps(*y, 0),
            resolution,
        )?;

        let slice_series: Vec<SeriesPoints> = statistics
            .slice_series()
            .into_iter()
            .map(|series| window_points(series, self.xlim))
            .collect();

        self.draw_line_panel(
            panels.panel(Panel::SliceClientRatio),
            Panel::SliceClientRatio,
            &slice_series,
            &|y| format!("{y:.2}"),
            resolution,
        )?;

        self.draw_block_ratio_panel(
            panels.panel(Panel::BlockRatio),
            statistics,
            resolution
        )?;
        self.draw_capacity_panel(
            panels.panel(Panel::Capacities),
            statistics,
            resolution
        )?;

        let summary_table = SummaryTable::compute(
            self.clients.len(),
            statistics,
            self.xlim
        );

        self.draw_summary_table(
            panels.panel(Panel::Summary),
            &summary_table,
            resolution
        )
    }

    fn indexed_window(&self, series: &[PlottersUnit]) -> SeriesPoints {
        window_points(series.iter().copied().enumerate(), self.xlim)
    }

    fn time_series_chart<'c, DB: DrawingBackend + 'c>(
        &self,
        area: &'c DrawingArea<DB, Shift>,
        panel: Panel,
        series: &[SeriesPoints],
        y_formatter: &dyn Fn(&PlottersUnit) -> String,
        resolution: PlotResolution,
    ) -> Result<TimeSeriesChartContext<'c, DB>, RenderError> {
        let font       = font_size(resolution);
        let label_font = label_font_size(resolution);

        let y_range = value_range(
            series
                .iter()
                .flatten()
                .map(|(_, value)| *value)
        );

        let mut chart_context = ChartBuilder::on(area)
            .caption(panel.caption(), (FONT, font))
            .margin(plot_margin(resolution))
            .x_label_area_size(font * 2)
            .y_label_area_size(font * 4)
            .build_cartesian_2d(
                PinnedTimeAxis::new(self.xlim, MAX_TICKS),
                y_range
            )?;

        chart_context
            .configure_mesh()
            .disable_mesh()
            .x_label_formatter(&|x| format!("{x:.0}"))
            .y_label_formatter(y_formatter)
            .label_style((FONT, label_font))
            .draw()?;

        Ok(chart_context)
    }

    fn draw_line_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        panel: Panel,
        series: &[SeriesPoints],
        y_formatter: &dyn Fn(&PlottersUnit) -> String,
        resolution: PlotResolution,
    ) -> Result<(), RenderError> {
        let mut chart_context = self.time_series_chart(
            area,
            panel,
            series,
            y_formatter,
            resolution
        )?;

        for (index, points) in series.iter().enumerate() {
            chart_context.draw_series(LineSeries::new(
                points.iter().copied(),
                line_color(index).stroke_width(LINE_WIDTH)
            ))?;
        }

        Ok(())
    }

    fn draw_block_ratio_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        statistics: &Statistics,
        resolution: PlotResolution,
    ) -> Result<(), RenderError> {
        let block_ratio = self.indexed_window(&statistics.block_ratio);
        let anomalies   = window_points(statistics.anomaly_points(), self.xlim);
        let radius      = marker_radius(
            self.options.scatter_size(),
            figure_dpi(resolution)
        );

        let mut chart_context = self.time_series_chart(
            area,
            Panel::BlockRatio,
            std::slice::from_ref(&block_ratio),
            &|y| format!("{y:.3}"),
            resolution
        )?;

        let color = line_color(0);

        chart_context
            .draw_series(LineSeries::new(
                block_ratio.iter().copied(),
                color.stroke_width(LINE_WIDTH)
            ))?
            .label("Block ratio")
            .legend(legend_line(color));

        chart_context
            .draw_series(
                anomalies
                    .iter()
                    .map(|point| Circle::new(*point, radius, ANOMALY_COLOR.filled()))
            )?
            .label("Anomalies")
            .legend(move |point| Circle::new(point, radius, ANOMALY_COLOR.filled()));

        self.draw_series_labels(&mut chart_context, resolution)
    }

    fn draw_capacity_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        statistics: &Statistics,
        resolution: PlotResolution,
    ) -> Result<(), RenderError> {
        let capacities: Vec<(BaseStationId, SeriesPoints)> = statistics
            .capacities
            .iter()
            .map(|(base_station, capacity)|
                (*base_station, self.indexed_window(capacity))
            )
            .collect();
        let series: Vec<SeriesPoints> = capacities
            .iter()
            .map(|(_, points)| points.clone())
            .collect();

        let mut chart_context = self.time_series_chart(
            area,
            Panel::Capacities,
            &series,
            &|y| format!("{y:.0}"),
            resolution
        )?;

        for (index, (base_station, points)) in capacities.iter().enumerate() {
            let color = line_color(index);

            chart_context
                .draw_series(LineSeries::new(
                    points.iter().copied(),
                    color.stroke_width(LINE_WIDTH)
                ))?
                .label(format!("BS_{base_station}"))
                .legend(legend_line(color));
        }

        self.draw_series_labels(&mut chart_context, resolution)
    }

    fn draw_series_labels<'b, DB: DrawingBackend + 'b>(
        &self,
        chart_context: &mut TimeSeriesChartContext<'b, DB>,
        resolution: PlotResolution,
    ) -> Result<(), RenderError> {
        chart_context
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(LEGEND_BACKGROUND_ALPHA))
            .border_style(BLACK)
            .label_font((FONT, label_font_size(resolution)))
            .draw()?;

        Ok(())
    }

    fn draw_summary_table<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        summary_table: &SummaryTable,
        resolution: PlotResolution,
    ) -> Result<(), RenderError> {
        let label_font = label_font_size(resolution);
        let cells = summary_cells(
            area.dim_in_pixel(),
            summary_table.rows().len(),
            label_font * 2,
            plot_margin(resolution)
        );
        let text_style = TextStyle::from((FONT, label_font))
            .pos(Pos::new(HPos::Left, VPos::Center));
        #[allow(clippy::cast_possible_wrap)]
        let padding = (label_font / 2) as i32;

        for ((label, value), row) in summary_table.rows().iter().zip(cells) {
            for ((top_left, bottom_right), text) in row
                .iter()
                .zip([label.to_string(), value.clone()])
            {
                let text_position = (
                    top_left.0 + padding,
                    (top_left.1 + bottom_right.1) / 2
                );

                area.draw(&Rectangle::new(
                    [*top_left, *bottom_right],
                    BLACK.stroke_width(1)
                ))?;
                area.draw(&Text::new(text, text_position, text_style.clone()))?;
            }
        }

        Ok(())
    }

    /// Clears `figure` and draws the map and the statistics panels.
    ///
    /// # Errors
    ///
    /// Will return `Err` if any part of the dashboard could not be drawn.
    pub fn draw_all<DB: DrawingBackend>(
        &self,
        figure: &DrawingArea<DB, Shift>,
        statistics: &Statistics,
    ) -> Result<(), RenderError> {
        figure.fill(&WHITE)?;

        self.draw_map(figure)?;
        self.draw_stats(figure, statistics)
    }

    /// Redraws the dashboard into an animated GIF on every tick of `clock`,
    /// with the statistics `snapshot` returns at that tick. Returns the
    /// number of rendered frames.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the animation could not be created or a frame
    /// could not be drawn.
    pub fn draw_live<C, S>(
        &self,
        clock: C,
        mut snapshot: S
    ) -> Result<usize, RenderError>
    where
        C: FrameClock,
        S: FnMut() -> Statistics,
    {
        let output_filename = self.options.live_filename();
        let resolution = self.figure_resolution(self.options.output_dpi());
        let frame_delay = u32::try_from(clock.period().as_millis())
            .unwrap_or(u32::MAX);

        let area = BitMapBackend::gif(
            &output_filename,
            resolution.into(),
            frame_delay
        )
            .map_err(|error| RenderError::Drawing(error.to_string()))?
            .into_drawing_area();

        info!("Live output filename: {}", output_filename.display());

        let mut player = LivePlayer::new(clock);

        let frames = player.play(|_| {
            let statistics = snapshot();

            self.draw_all(&area, &statistics)?;
            area.present()?;

            Ok(())
        })?;

        Ok(frames)
    }

    /// Renders the dashboard at [`SAVE_DPI`] into the configured output
    /// file and returns its path.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the figure could not be drawn or written.
    pub fn save_fig(&self, statistics: &Statistics) -> Result<PathBuf, RenderError> {
        let output_filename = self.options.output_filename().to_path_buf();
        let resolution = self.figure_resolution(SAVE_DPI);

        {
            let area = BitMapBackend::new(&output_filename, resolution.into())
                .into_drawing_area();

            self.draw_all(&area, statistics)?;
            area.present()?;
        }

        info!("Figure saved to {}", output_filename.display());

        Ok(output_filename)
    }

    /// Renders the dashboard at the configured DPI and hands the RGB pixels
    /// to `viewer`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the figure could not be drawn or the viewer
    /// failed.
    pub fn show_plot<V: FigureViewer + ?Sized>(
        &self,
        statistics: &Statistics,
        viewer: &mut V
    ) -> Result<(), RenderError> {
        let resolution = self.figure_resolution(self.options.output_dpi());
        let mut buffer = vec![0; resolution.rgb_buffer_len()];

        {
            let area = BitMapBackend::with_buffer(&mut buffer, resolution.into())
                .into_drawing_area();

            self.draw_all(&area, statistics)?;
            area.present()?;
        }

        viewer.show(WINDOW_TITLE, &buffer, resolution)
    }

    /// Bounding box of the station coverages, `None` without stations.
    #[deprecated(note = "pass explicit map limits to `Graph::new`")]
    #[must_use]
    pub fn get_map_limits(&self) -> Option<Axes2DRanges> {
        coverage_limits(self.base_stations)
    }
}

fn figure_resolution_of<DB: DrawingBackend>(
    figure: &DrawingArea<DB, Shift>
) -> PlotResolution {
    let (width, height) = figure.dim_in_pixel();

    PlotResolution::new(width, height)
}

fn figure_dpi(resolution: PlotResolution) -> Dpi {
    (resolution.width() / FIGURE_SIZE_INCHES.0).max(1)
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::backend::client::{ClientBuilder, Slice};
    use crate::backend::mathphysics::Point2D;
    use crate::backend::station::Coverage;
    use crate::backend::stats::ANOMALY_SENTINEL;
    use crate::frontend::player::IntervalClock;
    use crate::frontend::viewer::PngPreview;

    use super::*;


    fn base_station(id: BaseStationId, x: f32, y: f32, radius: f32) -> BaseStation {
        BaseStation::new(
            id,
            Coverage::build(Point2D::new(x, y), radius).unwrap()
        )
    }

    fn base_stations() -> Vec<BaseStation> {
        vec![
            base_station(1, 0.0, 0.0, 5.0),
            base_station(2, 10.0, 0.0, 2.0),
        ]
    }

    fn clients() -> Vec<Client> {
        vec![
            ClientBuilder::new(1)
                .set_slice(0, Slice::new("iot"))
                .set_base_station(2)
                .build(),
            ClientBuilder::new(2)
                .set_slice(1, Slice::new("data"))
                .build(),
            ClientBuilder::new(3)
                .set_slice(1, Slice::new("data"))
                .set_base_station(7)
                .build(),
        ]
    }

    fn statistics() -> Statistics {
        let mut anomalies = vec![0; 11];
        anomalies[4] = ANOMALY_SENTINEL;

        Statistics {
            connected_ratio: vec![
                0.5, 0.6, 0.7, 0.8, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3
            ],
            bandwidth_usage: (0..11).map(|i| 1_500.0 * f64::from(i)).collect(),
            slice_client_ratio: (0..11).map(|_| vec![0.25, 0.75]).collect(),
            block_ratio: (0..11).map(|i| 0.01 * f64::from(i)).collect(),
            anomalies,
            capacities: BTreeMap::from([
                (1, vec![100.0; 11]),
                (2, (0..11).map(|i| 50.0 + f64::from(i)).collect()),
            ]),
        }
    }

    fn graph_with_options<'a>(
        base_stations: &'a [BaseStation],
        clients: &'a [Client],
        options: DisplayOptions,
    ) -> Graph<'a> {
        Graph::with_rng(
            base_stations,
            clients,
            XWindow::new(0, 10),
            Axes2DRanges::new(-10.0..20.0, -10.0..10.0),
            options,
            &mut StdRng::seed_from_u64(3),
        )
    }

    fn graph<'a>(
        base_stations: &'a [BaseStation],
        clients: &'a [Client]
    ) -> Graph<'a> {
        graph_with_options(base_stations, clients, DisplayOptions::default())
    }

    #[test]
    fn every_station_gets_one_color() {
        let base_stations = base_stations();
        let clients = clients();
        let graph = graph(&base_stations, &clients);

        assert_eq!(2, graph.station_colors().len());
        assert!(graph.station_color(1).is_some());
        assert!(graph.station_color(2).is_some());
        assert!(graph.station_color(3).is_none());
    }

    #[test]
    fn station_colors_do_not_change() {
        let base_stations = base_stations();
        let clients = clients();
        let graph = graph(&base_stations, &clients);

        let statistics = statistics();
        let resolution = PlotResolution::new(800, 450);
        let mut buffer = vec![0; resolution.rgb_buffer_len()];

        let before = graph.station_colors().clone();

        {
            let area = BitMapBackend::with_buffer(&mut buffer, resolution.into())
                .into_drawing_area();

            graph.draw_all(&area, &statistics).unwrap();
            graph.draw_all(&area, &statistics).unwrap();
            area.present().unwrap();
        }

        assert_eq!(&before, graph.station_colors());
        assert!(buffer.iter().any(|channel| *channel != 255));
    }

    #[test]
    fn narrow_and_empty_windows_are_drawn() {
        let base_stations = base_stations();
        let clients = clients();
        let statistics = statistics();
        let resolution = PlotResolution::new(320, 180);
        let mut buffer = vec![0; resolution.rgb_buffer_len()];

        let narrow = Graph::with_rng(
            &base_stations,
            &clients,
            XWindow::new(2, 4),
            Axes2DRanges::new(-10.0..20.0, -10.0..10.0),
            DisplayOptions::default(),
            &mut StdRng::seed_from_u64(3),
        );
        let empty = Graph::with_rng(
            &[],
            &[],
            XWindow::new(5, 5),
            Axes2DRanges::default(),
            DisplayOptions::default(),
            &mut StdRng::seed_from_u64(3),
        );

        let area = BitMapBackend::with_buffer(&mut buffer, resolution.into())
            .into_drawing_area();

        narrow.draw_all(&area, &statistics).unwrap();
        empty.draw_all(&area, &Statistics::default()).unwrap();
    }

    #[test]
    fn figure_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.png");
        let base_stations = base_stations();
        let clients = clients();
        let graph = graph_with_options(
            &base_stations,
            &clients,
            DisplayOptions::default().set_output_filename(&path)
        );

        let saved = graph.save_fig(&statistics()).unwrap();

        assert_eq!(path, saved);
        assert!(path.exists());
    }

    #[test]
    fn plot_is_shown_in_viewer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.png");
        let base_stations = base_stations();
        let clients = clients();
        let graph = graph_with_options(
            &base_stations,
            &clients,
            DisplayOptions::default().set_output_dpi(20)
        );

        graph
            .show_plot(&statistics(), &mut PngPreview::new(&path))
            .unwrap();

        assert!(path.exists());
    }

    #[test]
    fn live_frames_are_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("live.png");
        let base_stations = base_stations();
        let clients = clients();
        let graph = graph_with_options(
            &base_stations,
            &clients,
            DisplayOptions::default()
                .set_output_dpi(20)
                .set_output_filename(&path)
        );
        let clock = IntervalClock::new(Duration::ZERO).with_frame_limit(2);
        let mut snapshots = 0;

        let frames = graph
            .draw_live(clock, || {
                snapshots += 1;
                statistics()
            })
            .unwrap();

        assert_eq!(2, frames);
        assert_eq!(2, snapshots);
        assert!(dir.path().join("live.gif").exists());
    }

    #[test]
    fn client_color_follows_base_station() {
        let base_stations = base_stations();
        let clients = clients();
        let graph = graph(&base_stations, &clients);

        assert_eq!(graph.station_color(2), Some(graph.client_color(&clients[0])));
        assert_eq!(UNCONNECTED_COLOR, graph.client_color(&clients[1]));
        assert_eq!(UNCONNECTED_COLOR, graph.client_color(&clients[2]));
    }

    #[test]
    fn coverage_limits_enclose_all_stations() {
        let limits = coverage_limits(&base_stations()).unwrap();

        assert_eq!(-5.0..12.0, limits.x());
        assert_eq!(-5.0..5.0, limits.y());
    }

    #[test]
    fn coverage_limits_without_stations() {
        assert_eq!(None, coverage_limits(&[]));
    }

    #[test]
    #[allow(deprecated)]
    fn deprecated_map_limits() {
        let base_stations = base_stations();
        let clients = clients();
        let graph = graph(&base_stations, &clients);

        assert_eq!(coverage_limits(&base_stations), graph.get_map_limits());
    }

    #[test]
    fn figure_dpi_from_resolution() {
        assert_eq!(100, figure_dpi(PlotResolution::new(1_600, 900)));
        assert_eq!(300, figure_dpi(PlotResolution::new(4_800, 2_700)));
        assert_eq!(1, figure_dpi(PlotResolution::new(8, 8)));
    }
}
