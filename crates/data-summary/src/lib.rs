//! Descriptive Statistics for Tabular Data
//!
//! Helpers used while exploring the training dataset:
//!
//! - **missing_data**: missing counts and percentages per column
//! - **find_constant_columns**: columns holding a single distinct value
//! - **unique_values**: distinct values per column, fewest first
//! - **mini_describe**: count, mean, spread and quartiles of one column
//! - **hist_box_qq** / **count_plots**: the numbers behind distribution plots
//!
//! Rendering is left to the caller.

mod dataset;
mod error;
mod plots;
mod summary;

pub use dataset::{Column, DataType, Dataset, Value};
pub use error::SummaryError;
pub use plots::{
    count_plots, hist_box_qq, BoxPlot, CountBar, CountPlot, DistributionPlot, Histogram, QqPlot,
    SecondPanel, SecondPlot,
};
pub use summary::{
    find_constant_columns, mini_describe, missing_data, unique_values, MiniDescription,
    MissingSummary, UniqueSummary, DEFAULT_MAX_COLWIDTH,
};
