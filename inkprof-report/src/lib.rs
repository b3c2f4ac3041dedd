#![warn(missing_docs)]
//! inkprof Report Rendering
//!
//! Formats a [`DeltaSummary`](inkprof_stats::DeltaSummary) into two
//! equivalent textual representations:
//! - a terminal/log display with labeled sections
//! - a plain-label block suitable for appending to the persisted
//!   verification report, delimited so repeated runs stack cleanly

mod render;

pub use render::{APPEND_FOOTER, APPEND_HEADER, render_append, render_display};
