//! Client UI state shared by the upload and admin flows.
//!
//! - [`ErrorSlot`] holds the single active [`UiError`] of a flow.
//! - [`messages`] maps service failures to user-facing text.
//! - [`chart`] projects a detection result into a bar series.

pub mod chart;
pub mod error_slot;
pub mod messages;

pub use chart::{BarStyle, ChartBar, ChartSeries, Rgb};
pub use error_slot::{ErrorSlot, FlowAction, UiError, UiErrorKind};
