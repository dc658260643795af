//! Skyline Cockpit Library
//!
//! Client-side core of the fleet utilization dashboard: date catalog
//! discovery, report fetching and normalization, rendering onto abstract
//! display surfaces, and the periodic refresh cycle.

pub mod api;
pub mod config;
pub mod controller;
pub mod dates;
pub mod page;
pub mod render;
pub mod report;
pub mod schedule;
pub mod traits;

// GUI-only modules
#[cfg(feature = "gui")]
pub mod style;
#[cfg(feature = "gui")]
pub mod widgets;

// Re-export commonly used types
pub use api::{CockpitApiClient, DateCatalogResponse};
pub use config::AppConfig;
pub use controller::{DashboardController, DashboardState, LoadOutcome};
pub use dates::{DateError, DisplayDate, to_api_date};
pub use page::{PageModel, PageSnapshot};
pub use render::render_report;
pub use report::{Breakdown, DailyReport, OperationCategory, RawDailyReport, normalize};
pub use schedule::{RefreshScheduler, SchedulerState};
pub use traits::{Element, MockSurface, Surface, SurfaceWrite};
