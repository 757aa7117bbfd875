use plotters::coord::Shift;
use plotters::prelude::*;

use super::plotcfg::Pixel;
use super::primitives::PixelOffset;


pub const GRID_ROWS: usize = 4;
pub const GRID_COLUMNS: usize = 3;
pub const WIDTH_RATIOS: [Pixel; GRID_COLUMNS] = [6, 3, 3];

pub const LEGEND_COLUMNS: usize = 5;

const SUMMARY_LABEL_PERCENT: Pixel = 55;
const SUMMARY_VALUE_PERCENT: Pixel = 30;


/// Statistics panels and their `(row, column)` cell in the grid. The map
/// spans every row of column 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    ConnectedRatio,
    BandwidthUsage,
    SliceClientRatio,
    BlockRatio,
    Capacities,
    Summary,
}

impl Panel {
    pub const ALL: [Self; 6] = [
        Self::ConnectedRatio,
        Self::BandwidthUsage,
        Self::SliceClientRatio,
        Self::BlockRatio,
        Self::Capacities,
        Self::Summary,
    ];

    #[must_use]
    pub fn cell(self) -> (usize, usize) {
        match self {
            Self::ConnectedRatio   => (0, 1),
            Self::BandwidthUsage   => (1, 1),
            Self::SliceClientRatio => (0, 2),
            Self::BlockRatio       => (2, 1),
            Self::Capacities       => (1, 2),
            Self::Summary          => (2, 2),
        }
    }

    #[must_use]
    pub fn caption(self) -> &'static str {
        match self {
            Self::ConnectedRatio   => "Connected Clients Ratio",
            Self::BandwidthUsage   => "Total Bandwidth Usage",
            Self::SliceClientRatio => "Client Count Ratio per Slice",
            Self::BlockRatio       => "Block ratio",
            Self::Capacities       => "Base Station Capacities",
            Self::Summary          => "",
        }
    }
}


/// Pixel widths of the grid columns. The remainder of the integer division
/// goes to the map column.
#[must_use]
pub fn column_widths(total_width: Pixel) -> [Pixel; GRID_COLUMNS] {
    let ratio_sum: Pixel = WIDTH_RATIOS.iter().sum();
    let mut widths = WIDTH_RATIOS.map(|ratio| total_width * ratio / ratio_sum);
    let assigned: Pixel = widths.iter().sum();

    widths[0] += total_width - assigned;

    widths
}


/// Left edge and vertical center of every legend entry in a band of 
/// `band` pixels, `columns` entries per row, the used columns centered.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_possible_wrap)]
pub fn legend_slots(
    count: usize,
    band: (Pixel, Pixel),
    columns: usize
) -> Vec<PixelOffset> {
    if count == 0 || columns == 0 {
        return Vec::new();
    }

    let (width, height) = band;
    let used_columns = count.min(columns) as Pixel;
    let rows         = count.div_ceil(columns) as Pixel;
    let cell_width   = width / columns as Pixel;
    let row_height   = height / rows;
    let start_x      = (width - cell_width * used_columns) / 2;

    (0..count)
        .map(|i| {
            let column = (i % columns) as Pixel;
            let row    = (i / columns) as Pixel;

            (
                (start_x + column * cell_width) as i32,
                (row * row_height + row_height / 2) as i32
            )
        })
        .collect()
}

/// Label and value cell rectangles of the summary table, vertically 
/// centered and flush with the right edge of `area` minus `margin`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_possible_wrap)]
pub fn summary_cells(
    area: (Pixel, Pixel),
    row_count: usize,
    row_height: Pixel,
    margin: Pixel,
) -> Vec<[(PixelOffset, PixelOffset); 2]> {
    let (width, height) = area;
    let label_width = width * SUMMARY_LABEL_PERCENT / 100;
    let value_width = width * SUMMARY_VALUE_PERCENT / 100;
    let table_height = row_height * row_count as Pixel;

    let right = width.saturating_sub(margin) as i32;
    let split = right - value_width as i32;
    let left  = split - label_width as i32;
    let top   = (height.saturating_sub(table_height) / 2) as i32;

    (0..row_count)
        .map(|row| {
            let y0 = top + (row as Pixel * row_height) as i32;
            let y1 = y0 + row_height as i32;

            [((left, y0), (split, y1)), ((split, y0), (right, y1))]
        })
        .collect()
}


pub struct DashboardPanels<DB: DrawingBackend> {
    map: DrawingArea<DB, Shift>,
    cells: Vec<DrawingArea<DB, Shift>>,
}

impl<DB: DrawingBackend> DashboardPanels<DB> {
    #[must_use]
    pub fn split(figure: &DrawingArea<DB, Shift>) -> Self {
        let (width, _) = figure.dim_in_pixel();
        let [map_width, ..] = column_widths(width);

        let (map, stats) = figure.split_horizontally(map_width);
        let cells = stats.split_evenly((GRID_ROWS, GRID_COLUMNS - 1));

        Self { map, cells }
    }

    #[must_use]
    pub fn map(&self) -> &DrawingArea<DB, Shift> {
        &self.map
    }

    #[must_use]
    pub fn panel(&self, panel: Panel) -> &DrawingArea<DB, Shift> {
        let (row, column) = panel.cell();

        &self.cells[row * (GRID_COLUMNS - 1) + column - 1]
    }
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn columns_follow_ratios() {
        assert_eq!([800, 400, 400], column_widths(1_600));
        assert_eq!([503, 250, 250], column_widths(1_003));
    }

    #[test]
    fn panels_occupy_distinct_stat_cells() {
        let cells: HashSet<(usize, usize)> = Panel::ALL
            .iter()
            .map(|panel| panel.cell())
            .collect();

        assert_eq!(Panel::ALL.len(), cells.len());
        assert!(cells
            .iter()
            .all(|(row, column)| *row < GRID_ROWS && (1..GRID_COLUMNS).contains(column))
        );
    }

    #[test]
    fn legend_wraps_after_five_entries() {
        assert_eq!(
            vec![(0, 25), (200, 25), (400, 25), (600, 25), (800, 25), (0, 75), (200, 75)],
            legend_slots(7, (1_000, 100), LEGEND_COLUMNS)
        );
    }

    #[test]
    fn short_legend_is_centered() {
        assert_eq!(
            vec![(300, 50), (500, 50)],
            legend_slots(2, (1_000, 100), LEGEND_COLUMNS)
        );
        assert!(legend_slots(0, (1_000, 100), LEGEND_COLUMNS).is_empty());
    }

    #[test]
    fn summary_cells_are_stacked_rows() {
        let cells = summary_cells((400, 200), 4, 20, 10);

        assert_eq!(4, cells.len());
        assert_eq!([((50, 60), (270, 80)), ((270, 60), (390, 80))], cells[0]);
        assert_eq!(((50, 120), (270, 140)), cells[3][0]);
    }

    #[test]
    fn split_sizes_follow_grid() {
        let mut buffer = vec![0; 1_600 * 900 * 3];
        let figure = BitMapBackend::with_buffer(&mut buffer, (1_600, 900))
            .into_drawing_area();

        let panels = DashboardPanels::split(&figure);

        assert_eq!((800, 900), panels.map().dim_in_pixel());
        assert_eq!((400, 225), panels.panel(Panel::Summary).dim_in_pixel());
        assert_eq!(
            (800, 225),
            panels.panel(Panel::BandwidthUsage).get_base_pixel()
        );
    }
}
