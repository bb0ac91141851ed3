pub mod aggregate;
pub mod controller;
pub mod dashboard;
pub mod fetcher;

pub use controller::InputController;
pub use dashboard::{Dashboard, Rendered};
pub use fetcher::{FetchStats, TaskFetcher};
