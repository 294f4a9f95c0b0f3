pub mod forecast_summary;
pub mod rules;

pub use forecast_summary::{format_day_line, summarize_days, FORECAST_DAYS};
pub use rules::AdviceEngine;
