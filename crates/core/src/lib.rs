pub mod config;
pub mod error;
pub mod filing;
pub mod price;
pub mod stats;

pub use config::StudyConfig;
pub use error::{Result, StudyError};
pub use filing::{latest_period_end_on_or_before, FilingRecord, StatementFields};
pub use price::{PricePoint, PriceSeries};
pub use stats::{mean, pearson, sample_variance, two_tailed_p, welch_t_test, WelchTest};
