//! Daily note activity report: approved notes counted per author per
//! hour-of-day over a trailing window, pivoted into one row per author.
//!
//! The pipeline is [`window`] -> [`store::NoteCountSource`] -> [`pivot`] -> [`render`].

pub mod cli;
pub mod error;
pub mod model;
pub mod pivot;
pub mod render;
pub mod report;
pub mod store;
pub mod util;
pub mod window;

pub use error::{MalformedRowError, RenderError, ReportError};
pub use model::{PivotRow, RawCount, Table, table_headers};
pub use report::{Format, NoteTrackingReport};
pub use store::{NewNote, NoteCountSource, NoteStore};
pub use window::TimeWindow;
