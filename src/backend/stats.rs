use std::collections::BTreeMap;

use super::mathphysics::{format_bps, BitsPerSecond};
use super::station::BaseStationId;


pub type AnomalyFlag = i32;


/// Flag value marking a timestep as anomalous in a detector output series.
pub const ANOMALY_SENTINEL: AnomalyFlag = -1;

pub const ROW_INITIAL_CLIENTS: &str     = "Initial number of clients";
pub const ROW_AVERAGE_CONNECTED: &str   = "Average connected clients";
pub const ROW_AVERAGE_BANDWIDTH: &str   = "Average bandwidth usage";
pub const ROW_AVERAGE_BLOCK_RATIO: &str = "Average block ratio";

const EMPTY_WINDOW_CELL: &str = "-";


/// Range of timesteps `[left, right)` displayed on the statistics panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XWindow {
    left: usize,
    right: usize
}

impl XWindow {
    #[must_use]
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    #[must_use]
    pub fn left(&self) -> usize {
        self.left
    }

    #[must_use]
    pub fn right(&self) -> usize {
        self.right
    }

    /// Part of `series` inside the window. Bounds past the end of the 
    /// series are clamped.
    #[must_use]
    pub fn slice<'a, T>(&self, series: &'a [T]) -> &'a [T] {
        let end   = self.right.min(series.len());
        let start = self.left.min(end);

        &series[start..end]
    }

    #[must_use]
    pub fn mean(&self, series: &[f64]) -> Option<f64> {
        let window = self.slice(series);

        if window.is_empty() {
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        let count = window.len() as f64;

        Some(window.iter().sum::<f64>() / count)
    }
}


/// Series of one simulation run aligned to the same time axis.
#[derive(Clone, Debug, Default)]
pub struct Statistics {
    pub connected_ratio: Vec<f64>,
    pub bandwidth_usage: Vec<BitsPerSecond>,
    /// Per timestep, one ratio for every slice.
    pub slice_client_ratio: Vec<Vec<f64>>,
    pub block_ratio: Vec<f64>,
    pub anomalies: Vec<AnomalyFlag>,
    pub capacities: BTreeMap<BaseStationId, Vec<f64>>,
}

impl Statistics {
    #[must_use]
    pub fn anomaly_indices(&self) -> Vec<usize> {
        self.anomalies
            .iter()
            .enumerate()
            .filter(|(_, flag)| **flag == ANOMALY_SENTINEL)
            .map(|(index, _)| index)
            .collect()
    }

    /// Anomalous steps paired with the block ratio at the same step. 
    /// Steps past the end of the block ratio series are skipped.
    #[must_use]
    pub fn anomaly_points(&self) -> Vec<(usize, f64)> {
        self.anomaly_indices()
            .into_iter()
            .filter_map(|index| {
                let value = self.block_ratio.get(index)?;

                Some((index, *value))
            })
            .collect()
    }

    /// Transposes the per-timestep slice ratios into one series per slice.
    /// Timesteps with fewer entries leave gaps in the higher slices.
    #[must_use]
    pub fn slice_series(&self) -> Vec<Vec<(usize, f64)>> {
        let slice_count = self.slice_client_ratio
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0);

        let mut series = vec![Vec::new(); slice_count];

        for (step, ratios) in self.slice_client_ratio.iter().enumerate() {
            for (slice_index, ratio) in ratios.iter().enumerate() {
                series[slice_index].push((step, *ratio));
            }
        }

        series
    }
}


#[derive(Clone, Debug, PartialEq)]
pub struct SummaryTable {
    rows: Vec<(&'static str, String)>
}

impl SummaryTable {
    /// Client count comes from the whole collection, the averages only 
    /// from the steps inside `window`.
    #[must_use]
    pub fn compute(
        client_count: usize,
        statistics: &Statistics,
        window: XWindow
    ) -> Self {
        let average_connected = window
            .mean(&statistics.connected_ratio)
            .map(|mean| format!("{mean:.2}"));
        let average_bandwidth = window
            .mean(&statistics.bandwidth_usage)
            .map(|mean| format_bps(mean, 2));
        let average_block_ratio = window
            .mean(&statistics.block_ratio)
            .map(|mean| format!("{mean:.4}"));

        let cell = |value: Option<String>| 
            value.unwrap_or_else(|| EMPTY_WINDOW_CELL.to_string());

        let rows = vec![
            (ROW_INITIAL_CLIENTS, client_count.to_string()),
            (ROW_AVERAGE_CONNECTED, cell(average_connected)),
            (ROW_AVERAGE_BANDWIDTH, cell(average_bandwidth)),
            (ROW_AVERAGE_BLOCK_RATIO, cell(average_block_ratio)),
        ];

        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[(&'static str, String)] {
        &self.rows
    }

    #[must_use]
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(row_label, _)| *row_label == label)
            .map(|(_, value)| value.as_str())
    }
}
