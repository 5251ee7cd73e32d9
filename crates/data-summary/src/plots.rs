//! Distribution Plot Data
//!
//! Numbers a renderer needs for histograms, box plots, Q-Q plots and count
//! plots. Missing cells are dropped before any computation.

use crate::dataset::{Dataset, Value};
use crate::error::SummaryError;
use crate::summary::quantile;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use std::collections::HashMap;
use tracing::debug;

/// Panel drawn next to each histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondPlot {
    #[default]
    Box,
    Qq,
}

/// Equal-width histogram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// `counts.len() + 1` bin edges
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Histogram with automatically chosen bins
    ///
    /// Bin width is the smaller of the Sturges and Freedman-Diaconis widths,
    /// falling back to Sturges when the interquartile range is zero.
    pub fn auto(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                edges: vec![0.0, 1.0],
                counts: vec![0],
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len() as f64;
        let (mut first, mut last) = (sorted[0], sorted[sorted.len() - 1]);
        if first == last {
            first -= 0.5;
            last += 0.5;
        }

        let span = sorted[sorted.len() - 1] - sorted[0];
        let sturges = span / (n.log2() + 1.0);
        let iqr = quantile(&sorted, 0.75) - quantile(&sorted, 0.25);
        let fd = 2.0 * iqr * n.powf(-1.0 / 3.0);
        let width = if fd > 0.0 { fd.min(sturges) } else { sturges };

        let bins = if width > 0.0 {
            ((last - first) / width).ceil().max(1.0) as usize
        } else {
            1
        };

        let step = (last - first) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| first + step * i as f64).collect();
        let mut counts = vec![0usize; bins];
        for &v in &sorted {
            let idx = (((v - first) / (last - first)) * bins as f64) as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        Self { edges, counts }
    }
}

/// Box-and-whisker summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlot {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value within `q1 - 1.5 * IQR`
    pub whisker_low: f64,
    /// Largest value within `q3 + 1.5 * IQR`
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxPlot {
    pub fn from_values(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let fence = 1.5 * (q3 - q1);
        let (low_fence, high_fence) = (q1 - fence, q3 + fence);

        let mut inside = sorted
            .iter()
            .copied()
            .filter(|&v| v >= low_fence && v <= high_fence);
        let whisker_low = inside.next().unwrap_or(f64::NAN);
        let whisker_high = inside.last().unwrap_or(whisker_low);
        Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers: sorted
                .iter()
                .copied()
                .filter(|&v| v < low_fence || v > high_fence)
                .collect(),
        }
    }
}

/// Normal probability plot with its least-squares line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QqPlot {
    /// Theoretical normal quantiles
    pub theoretical: Vec<f64>,
    /// Ordered sample values
    pub ordered: Vec<f64>,
    pub slope: f64,
    pub intercept: f64,
    /// Correlation between theoretical and ordered values
    pub r: f64,
}

impl QqPlot {
    pub fn from_values(values: &[f64]) -> Result<Self, SummaryError> {
        let mut ordered = values.to_vec();
        ordered.sort_by(f64::total_cmp);

        let normal =
            Normal::new(0.0, 1.0).map_err(|e| SummaryError::Statistics(e.to_string()))?;
        let theoretical: Vec<f64> = order_statistic_medians(ordered.len())
            .into_iter()
            .map(|p| normal.inverse_cdf(p))
            .collect();

        let (slope, intercept, r) = least_squares(&theoretical, &ordered);
        Ok(Self {
            theoretical,
            ordered,
            slope,
            intercept,
            r,
        })
    }
}

/// Filliben's estimate of uniform order statistic medians
fn order_statistic_medians(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let nf = n as f64;
    let mut m: Vec<f64> = (1..=n).map(|i| (i as f64 - 0.3175) / (nf + 0.365)).collect();
    m[n - 1] = 0.5f64.powf(1.0 / nf);
    m[0] = 1.0 - m[n - 1];
    m
}

fn least_squares(x: &[f64], y: &[f64]) -> (f64, f64, f64) {
    let n = x.len() as f64;
    if x.len() < 2 {
        return (f64::NAN, f64::NAN, f64::NAN);
    }
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let (dx, dy) = (xi - mean_x, yi - mean_y);
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    let slope = sxy / sxx;
    (slope, mean_y - slope * mean_x, sxy / (sxx * syy).sqrt())
}

/// Right-hand panel of a distribution plot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SecondPanel {
    Box(BoxPlot),
    Qq(QqPlot),
}

/// Histogram plus box or Q-Q panel for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionPlot {
    pub column: String,
    pub histogram: Histogram,
    pub second: SecondPanel,
}

/// Histogram and a box plot or Q-Q plot for each numeric column
pub fn hist_box_qq(
    data: &Dataset,
    columns: &[&str],
    second_plot: SecondPlot,
) -> Result<Vec<DistributionPlot>, SummaryError> {
    columns
        .iter()
        .map(|&name| {
            let values = data.column(name)?.numeric_values()?;
            let second = match second_plot {
                SecondPlot::Box => SecondPanel::Box(BoxPlot::from_values(&values)),
                SecondPlot::Qq => SecondPanel::Qq(QqPlot::from_values(&values)?),
            };
            debug!("Distribution data for {} ({} values)", name, values.len());
            Ok(DistributionPlot {
                column: name.to_string(),
                histogram: Histogram::auto(&values),
                second,
            })
        })
        .collect()
}

/// One bar of a count plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountBar {
    pub value: Value,
    pub count: usize,
    /// Share of all rows, missing included
    pub percent: f64,
    /// Annotation drawn above the bar
    pub label: String,
}

/// Category frequencies for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountPlot {
    pub column: String,
    pub total_rows: usize,
    pub bars: Vec<CountBar>,
}

/// Count bars for each column
///
/// Numeric categories are ordered by value, all others by first appearance.
pub fn count_plots(data: &Dataset, columns: &[&str]) -> Result<Vec<CountPlot>, SummaryError> {
    let total_rows = data.rows();
    columns
        .iter()
        .map(|&name| {
            let column = data.column(name)?;

            let mut order: Vec<Value> = Vec::new();
            let mut counts = HashMap::new();
            for value in column.present() {
                let count = counts.entry(value.key()).or_insert(0usize);
                if *count == 0 {
                    order.push(value.clone());
                }
                *count += 1;
            }
            if column.dtype().is_numeric() {
                order.sort_by(|a, b| {
                    let (a, b) = (a.as_f64().unwrap_or(f64::NAN), b.as_f64().unwrap_or(f64::NAN));
                    a.total_cmp(&b)
                });
            }

            let bars = order
                .into_iter()
                .map(|value| {
                    let count = counts.get(&value.key()).copied().unwrap_or(0);
                    let percent = if total_rows == 0 {
                        0.0
                    } else {
                        count as f64 / total_rows as f64 * 100.0
                    };
                    CountBar {
                        value,
                        count,
                        percent,
                        label: format!("{:.2}%", percent),
                    }
                })
                .collect();

            Ok(CountPlot {
                column: name.to_string(),
                total_rows,
                bars,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Column;

    fn sample() -> Dataset {
        Dataset::new(vec![
            Column::ints("ca", vec![Some(2), Some(0), Some(0), Some(1), None, Some(0)]),
            Column::floats(
                "oldpeak",
                vec![Some(2.3), Some(3.5), Some(1.4), Some(0.8), Some(0.6), Some(0.4)],
            ),
            Column::texts(
                "slope",
                vec![Some("Flat"), Some("Upsloping"), Some("Flat"), None, None, Some("Flat")],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_histogram_covers_every_value() {
        let values = [1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0, 10.0];
        let hist = Histogram::auto(&values);
        assert_eq!(hist.edges.len(), hist.counts.len() + 1);
        assert_eq!(hist.counts.iter().sum::<usize>(), values.len());
        assert_eq!(hist.edges[0], 1.0);
        assert!((hist.edges[hist.edges.len() - 1] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_of_constant_values() {
        let hist = Histogram::auto(&[5.0, 5.0, 5.0]);
        assert_eq!(hist.counts, [3]);
        assert_eq!(hist.edges, [4.5, 5.5]);
    }

    #[test]
    fn test_box_plot_outliers() {
        let plot = BoxPlot::from_values(&[1.0, 2.0, 3.0, 4.0, 100.0]);
        assert_eq!(plot.median, 3.0);
        assert_eq!(plot.q1, 2.0);
        assert_eq!(plot.q3, 4.0);
        assert_eq!(plot.whisker_low, 1.0);
        assert_eq!(plot.whisker_high, 4.0);
        assert_eq!(plot.outliers, [100.0]);
    }

    #[test]
    fn test_qq_plot_of_symmetric_sample() {
        let plot = QqPlot::from_values(&[-2.0, -1.0, 0.0, 1.0, 2.0]).unwrap();
        assert_eq!(plot.theoretical.len(), 5);
        assert!(plot.theoretical[2].abs() < 1e-9);
        assert!((plot.theoretical[0] + plot.theoretical[4]).abs() < 1e-9);
        assert!(plot.intercept.abs() < 1e-9);
        assert!(plot.slope > 0.0);
        assert!(plot.r > 0.95);
    }

    #[test]
    fn test_order_statistic_medians() {
        let m = order_statistic_medians(3);
        assert!((m[2] - 0.5f64.powf(1.0 / 3.0)).abs() < 1e-12);
        assert!((m[0] - (1.0 - m[2])).abs() < 1e-12);
        assert!((m[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_hist_box_qq() {
        let plots = hist_box_qq(&sample(), &["ca", "oldpeak"], SecondPlot::Qq).unwrap();
        assert_eq!(plots.len(), 2);
        assert_eq!(plots[0].histogram.counts.iter().sum::<usize>(), 5);
        assert!(matches!(plots[1].second, SecondPanel::Qq(_)));

        assert!(matches!(
            hist_box_qq(&sample(), &["slope"], SecondPlot::Box),
            Err(SummaryError::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_count_plots() {
        let plots = count_plots(&sample(), &["ca", "slope"]).unwrap();

        let ca = &plots[0];
        let values: Vec<_> = ca.bars.iter().map(|b| (b.value.clone(), b.count)).collect();
        assert_eq!(
            values,
            [(Value::Int(0), 3), (Value::Int(1), 1), (Value::Int(2), 1)]
        );
        assert_eq!(ca.bars[0].label, "50.00%");

        let slope = &plots[1];
        assert_eq!(slope.bars[0].value, Value::Text("Flat".into()));
        assert_eq!(slope.bars[1].label, "16.67%");
    }
}
