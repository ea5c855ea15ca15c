//! Domain records exchanged with the market data service

mod company;
mod lenient;
mod prediction;
mod series;

pub use company::{Company, RosterEntry};
pub use prediction::{Prediction, PredictionFactors, Trend};
pub use series::{TimeSeriesPoint, sort_chronologically};

pub(crate) use series::parse_day;
