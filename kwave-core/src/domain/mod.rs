//! Domain types for K-Wave

pub mod phase;
pub mod series;

pub use phase::{score_label, CycleMethod, Phase};
pub use series::{PricePoint, PriceSeries};
