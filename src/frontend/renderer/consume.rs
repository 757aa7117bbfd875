use std::path::{Path, PathBuf};

use log::{info, warn};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::backend::client::{Client, ClientId, DATA_SLICE_NAME, IOT_SLICE_NAME};

use super::{legend_line, RenderError, FONT, LINE_WIDTH};
use super::plotcfg::{
    value_range, PlotResolution, PlottersUnit, CONSUME_FIGURE_SIZE_INCHES,
    DEFAULT_OUTPUT_DPI
};


const MARKER_SIZE: u32   = 4;
const DASH_LENGTH: u32   = 8;
const DASH_SPACING: u32  = 5;
const CAPTION_FONT: u32  = 24;
const LABEL_FONT: u32    = 16;


/// Average consume time (`consume / connected`) per client, split by
/// slice, for clients with positive connected and consume time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConsumeTimeSeries {
    iot: Vec<(ClientId, f64)>,
    data: Vec<(ClientId, f64)>,
    qualifying: usize,
}

impl ConsumeTimeSeries {
    #[must_use]
    pub fn from_clients(clients: &[Client]) -> Self {
        let mut series = Self::default();

        let qualifying = clients
            .iter()
            .filter(|client|
                client.total_connected_time() > 0.0
                    && client.total_consume_time() > 0.0
            );

        for client in qualifying {
            series.qualifying += 1;

            let average = client.total_consume_time()
                / client.total_connected_time();
            let point = (client.pk(), average);

            match client.slice().map(|slice| slice.name()) {
                Some(IOT_SLICE_NAME)  => series.iot.push(point),
                Some(DATA_SLICE_NAME) => series.data.push(point),
                _ => {}
            }
        }

        series
    }

    /// `true` when no client qualified, regardless of slice.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.qualifying == 0
    }

    #[must_use]
    pub fn iot(&self) -> &[(ClientId, f64)] {
        &self.iot
    }

    #[must_use]
    pub fn data(&self) -> &[(ClientId, f64)] {
        &self.data
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_plot_points(series: &[(ClientId, f64)]) -> Vec<(PlottersUnit, PlottersUnit)> {
    series
        .iter()
        .map(|(client_id, average)| (*client_id as PlottersUnit, *average))
        .collect()
}


fn draw_consume_time<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    iot: &[(PlottersUnit, PlottersUnit)],
    data: &[(PlottersUnit, PlottersUnit)],
) -> Result<(), RenderError> {
    let all_points = iot.iter().chain(data.iter());
    let x_range = value_range(all_points.clone().map(|(x, _)| *x));
    let y_range = value_range(all_points.map(|(_, y)| *y));

    area.fill(&WHITE)?;

    let mut chart_context = ChartBuilder::on(area)
        .caption("Average Consume Time by Slice Type", (FONT, CAPTION_FONT))
        .margin(LABEL_FONT)
        .x_label_area_size(LABEL_FONT * 3)
        .y_label_area_size(LABEL_FONT * 5)
        .build_cartesian_2d(x_range, y_range)?;

    chart_context
        .configure_mesh()
        .x_desc("Client ID")
        .y_desc("Average Consume Time")
        .x_label_formatter(&|x| format!("{x:.0}"))
        .label_style((FONT, LABEL_FONT))
        .draw()?;

    if !iot.is_empty() {
        let color = BLUE.to_rgba();

        chart_context
            .draw_series(LineSeries::new(
                iot.iter().copied(),
                color.stroke_width(LINE_WIDTH)
            ))?
            .label("IoT Slice")
            .legend(legend_line(color));
        chart_context.draw_series(
            iot
                .iter()
                .map(|point| Circle::new(*point, MARKER_SIZE, BLUE.filled()))
        )?;
    }

    if !data.is_empty() {
        let color = GREEN.to_rgba();

        chart_context
            .draw_series(DashedLineSeries::new(
                data.iter().copied(),
                DASH_LENGTH,
                DASH_SPACING,
                color.stroke_width(LINE_WIDTH)
            ))?
            .label("Data Slice")
            .legend(legend_line(color));
        chart_context.draw_series(
            data
                .iter()
                .map(|point|
                    Cross::new(*point, MARKER_SIZE, GREEN.stroke_width(LINE_WIDTH))
                )
        )?;
    }

    chart_context
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, LABEL_FONT))
        .draw()?;

    Ok(())
}


/// Plots the average consume time of IoT and data slice clients against
/// their ids and saves it to `output_filename`. Returns `None` without
/// writing anything when no client qualifies.
///
/// # Errors
///
/// Will return `Err` if the chart could not be drawn or saved.
pub fn plot_average_consume_time(
    clients: &[Client],
    output_filename: impl AsRef<Path>,
) -> Result<Option<PathBuf>, RenderError> {
    let series = ConsumeTimeSeries::from_clients(clients);

    if series.is_empty() {
        warn!("No clients with valid connected and consume times.");
        return Ok(None);
    }

    let output_filename = output_filename.as_ref().to_path_buf();
    let resolution = PlotResolution::from_figure_size(
        CONSUME_FIGURE_SIZE_INCHES,
        DEFAULT_OUTPUT_DPI
    );
    let iot  = to_plot_points(series.iot());
    let data = to_plot_points(series.data());

    {
        let area = BitMapBackend::new(&output_filename, resolution.into())
            .into_drawing_area();

        draw_consume_time(&area, &iot, &data)?;
        area.present()?;
    }

    info!("Average consume time saved to {}", output_filename.display());

    Ok(Some(output_filename))
}
