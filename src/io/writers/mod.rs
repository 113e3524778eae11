//! Output writers besides the table itself: the JSON map view consumed by a
//! map widget and the JSON run report sidecar.
pub mod map;
pub mod report;

pub use map::{MapView, write_map_view};
pub use report::write_report_sidecar;
