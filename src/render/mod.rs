//! Presenter: turns daily counts into a chart view and draws it.

pub mod html;
pub mod terminal;
mod vega;
mod view;

pub use view::{ChartSpec, NO_DATA_MESSAGE, RawTable, View, build_view};
