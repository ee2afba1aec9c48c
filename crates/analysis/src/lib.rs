pub mod align;
pub mod correlation;
pub mod dataset;
pub mod ratios;
pub mod returns;
pub mod significance;
pub mod study;

pub use align::align_to_trading_day;
pub use correlation::{correlate, CorrelationResult, MIN_PAIRS};
pub use dataset::{EventDataset, FilingEvent};
pub use ratios::{RatioKind, RatioSet};
pub use returns::{forward_return, forward_return_at};
pub use significance::{test_windows, TestResult};
pub use study::{EventStudy, StudyReport};
