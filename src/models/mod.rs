pub mod daily_count;
pub mod date_range;
pub mod task;

pub use daily_count::DailyCount;
pub use date_range::DateRange;
pub use task::{TaskFrame, TaskRecord};
