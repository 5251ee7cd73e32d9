//! Column Summaries

use crate::dataset::{Dataset, Value};
use crate::error::SummaryError;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::HashSet;

/// Default width of the rendered value list in [`UniqueSummary::display_values`]
pub const DEFAULT_MAX_COLWIDTH: usize = 50;

/// Missing-value count for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingSummary {
    pub column: String,
    /// Number of missing cells
    pub total: usize,
    /// Missing cells as a percentage of all rows
    pub percent: f64,
    pub datatype: &'static str,
}

/// Missing-value counts per column
///
/// With `show_all` false, only columns that have missing cells are returned.
pub fn missing_data(data: &Dataset, show_all: bool) -> Vec<MissingSummary> {
    let rows = data.rows();
    data.columns()
        .iter()
        .map(|column| {
            let total = column.missing();
            MissingSummary {
                column: column.name().to_string(),
                total,
                percent: if rows == 0 {
                    0.0
                } else {
                    total as f64 / rows as f64 * 100.0
                },
                datatype: column.dtype().as_str(),
            }
        })
        .filter(|summary| show_all || summary.total > 0)
        .collect()
}

/// Names of columns with exactly one distinct present value
pub fn find_constant_columns(data: &Dataset) -> Vec<String> {
    data.columns()
        .iter()
        .filter(|column| distinct(column.present()).len() == 1)
        .map(|column| column.name().to_string())
        .collect()
}

/// Distinct values of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniqueSummary {
    pub column: String,
    /// Number of present cells
    pub total: usize,
    /// Number of distinct present values
    pub uniques: usize,
    /// Distinct values in order of first appearance; `None` stands for missing
    pub values: Vec<Option<Value>>,
}

impl UniqueSummary {
    /// Render the value list, cut to `max_colwidth` characters
    pub fn display_values(&self, max_colwidth: usize) -> String {
        let rendered = format!(
            "[{}]",
            self.values
                .iter()
                .map(|v| match v {
                    Some(v) => v.to_string(),
                    None => "nan".to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ")
        );

        if rendered.chars().count() <= max_colwidth {
            return rendered;
        }
        let keep = max_colwidth.saturating_sub(3);
        let mut cut: String = rendered.chars().take(keep).collect();
        cut.push_str("...");
        cut
    }
}

/// Distinct values per column, columns with the fewest distinct values first
pub fn unique_values(data: &Dataset) -> Vec<UniqueSummary> {
    let mut summaries: Vec<UniqueSummary> = data
        .columns()
        .iter()
        .map(|column| {
            let mut seen = HashSet::new();
            let mut seen_missing = false;
            let mut values = Vec::new();
            for cell in column.cells() {
                match cell {
                    Some(v) => {
                        if seen.insert(v.key()) {
                            values.push(Some(v.clone()));
                        }
                    }
                    None if !seen_missing => {
                        seen_missing = true;
                        values.push(None);
                    }
                    None => {}
                }
            }
            UniqueSummary {
                column: column.name().to_string(),
                total: column.len() - column.missing(),
                uniques: seen.len(),
                values,
            }
        })
        .collect();

    summaries.sort_by_key(|s| s.uniques);
    summaries
}

/// Compact description of a numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiniDescription {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub q25: f64,
    #[serde(rename = "50%")]
    pub q50: f64,
    #[serde(rename = "75%")]
    pub q75: f64,
    pub max: f64,
    /// `max - min`
    pub range: f64,
    /// `75% - 25%`
    pub iqr: f64,
}

/// Describe one numeric column; missing cells are skipped
pub fn mini_describe(data: &Dataset, column_name: &str) -> Result<MiniDescription, SummaryError> {
    let mut values = data.column(column_name)?.numeric_values()?;
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let mean = values.iter().mean();
    let std = values.iter().std_dev();
    let min = values.first().copied().unwrap_or(f64::NAN);
    let max = values.last().copied().unwrap_or(f64::NAN);
    let q25 = quantile(&values, 0.25);
    let q50 = quantile(&values, 0.5);
    let q75 = quantile(&values, 0.75);

    Ok(MiniDescription {
        column: column_name.to_string(),
        count,
        mean,
        std,
        min,
        q25,
        q50,
        q75,
        max,
        range: max - min,
        iqr: q75 - q25,
    })
}

/// Linear-interpolation quantile of sorted values; NaN when empty
pub(crate) fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn distinct<'a>(values: impl Iterator<Item = &'a Value>) -> HashSet<crate::dataset::ValueKey> {
    values.map(Value::key).collect()
}
