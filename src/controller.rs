//! Dashboard state synchronization.
//!
//! `DashboardController` owns the dashboard's only shared state (the date
//! catalog and the currently displayed date) and is the single place that
//! mutates it. Clones are handles to the same controller, so UI callbacks
//! and the refresh scheduler can all drive it concurrently.
//!
//! Fetches are never cancelled. When two report fetches overlap, the one
//! that resolves last is what stays on screen. With request fencing
//! enabled, a response older than the newest applied one is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::CockpitApiClient;
use crate::dates::DisplayDate;
use crate::render::render_report;
use crate::report::normalize;
use crate::traits::{Element, Surface};

/// Catalog and selection shared by every part of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    /// Dates with a report, in backend order (ascending).
    pub available_dates: Vec<String>,
    /// Display date of the report currently on screen. Set by every
    /// successful report load and never cleared afterwards.
    pub selected_date: Option<String>,
}

/// Result of one report load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The report was rendered and became the selected date.
    Applied,
    /// A newer request had already been applied; the response was dropped.
    Stale,
    /// The date was not a valid `DD/MM/YYYY` value; nothing was fetched.
    Rejected,
    /// Transport or parse failure; the previous view is unchanged.
    Failed,
}

#[derive(Debug, Default)]
struct Shared {
    state: DashboardState,
    last_applied: u64,
}

struct Inner<S> {
    api: CockpitApiClient,
    surface: S,
    request_fencing: bool,
    next_request: AtomicU64,
    shared: Mutex<Shared>,
}

pub struct DashboardController<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for DashboardController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Shows the loading indicator until dropped.
struct LoadingGuard<'a, S: Surface> {
    surface: &'a S,
}

impl<'a, S: Surface> LoadingGuard<'a, S> {
    fn show(surface: &'a S) -> Self {
        surface.set_visible(Element::LoadingIndicator, true);
        Self { surface }
    }
}

impl<S: Surface> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.set_visible(Element::LoadingIndicator, false);
    }
}

impl<S: Surface> DashboardController<S> {
    pub fn new(api: CockpitApiClient, surface: S, request_fencing: bool) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                surface,
                request_fencing,
                next_request: AtomicU64::new(0),
                shared: Mutex::new(Shared::default()),
            }),
        }
    }

    pub fn surface(&self) -> &S {
        &self.inner.surface
    }

    pub fn request_fencing(&self) -> bool {
        self.inner.request_fencing
    }

    pub fn state(&self) -> DashboardState {
        self.inner.shared.lock().unwrap().state.clone()
    }

    pub fn selected_date(&self) -> Option<String> {
        self.inner.shared.lock().unwrap().state.selected_date.clone()
    }

    pub fn available_dates(&self) -> Vec<String> {
        self.inner
            .shared
            .lock()
            .unwrap()
            .state
            .available_dates
            .clone()
    }

    /// Load the date catalog, fill the date selector and show the most
    /// recent date.
    ///
    /// An empty catalog or a failed fetch leaves every piece of state as it
    /// was and issues no report fetch.
    pub async fn load_available_dates(&self) {
        let surface = &self.inner.surface;
        let _loading = LoadingGuard::show(surface);

        let dates = match self.inner.api.fetch_available_dates().await {
            Ok(dates) => dates,
            Err(e) => {
                tracing::error!("Error loading available dates: {:#}", e);
                return;
            }
        };

        let Some(latest) = dates.last().cloned() else {
            tracing::warn!("Date catalog is empty, keeping current view");
            return;
        };

        tracing::info!("Loaded {} available dates, latest {}", dates.len(), latest);
        surface.set_options(Element::DateSelector, &dates, Some(&latest));
        self.inner.shared.lock().unwrap().state.available_dates = dates;

        self.load_date_data(&latest).await;
    }

    /// Fetch, normalize and render the report for a `DD/MM/YYYY` date.
    ///
    /// On success the date becomes the selected date. On any failure the
    /// view and the selected date are left untouched.
    pub async fn load_date_data(&self, display_date: &str) -> LoadOutcome {
        let date = match DisplayDate::parse(display_date) {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!("Refusing to load report: {}", e);
                return LoadOutcome::Rejected;
            }
        };

        let request = self.inner.next_request.fetch_add(1, Ordering::SeqCst) + 1;
        let api_date = date.api_date();
        tracing::debug!("Fetching report #{} for {}", request, api_date);

        let raw = match self.inner.api.fetch_daily_report(&api_date).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Error loading date data: {:#}", e);
                return LoadOutcome::Failed;
            }
        };

        let report = normalize(raw);

        let mut shared = self.inner.shared.lock().unwrap();
        if self.inner.request_fencing && request < shared.last_applied {
            tracing::debug!(
                "Dropping report #{} for {}, #{} is already shown",
                request,
                api_date,
                shared.last_applied
            );
            return LoadOutcome::Stale;
        }

        render_report(&self.inner.surface, &report);
        shared.last_applied = shared.last_applied.max(request);
        shared.state.selected_date = Some(date.as_str().to_string());

        tracing::info!(
            "Rendered report for {} (utilization {}%)",
            date,
            report.utilization_percent
        );
        LoadOutcome::Applied
    }

    /// React to the user choosing a date in the selector.
    pub async fn select_date(&self, display_date: &str) -> LoadOutcome {
        self.inner
            .surface
            .set_selected(Element::DateSelector, display_date);
        self.load_date_data(display_date).await
    }

    /// Re-fetch the selected date. Does nothing until a date is selected.
    pub async fn refresh(&self) -> Option<LoadOutcome> {
        let Some(date) = self.selected_date() else {
            tracing::debug!("No date selected yet, skipping refresh");
            return None;
        };
        Some(self.load_date_data(&date).await)
    }

    /// Menu toggle click: show or hide the menu panel.
    pub fn toggle_menu(&self) {
        let surface = &self.inner.surface;
        if !surface.has(Element::MenuToggle) {
            return;
        }
        if let Some(visible) = surface.is_visible(Element::MenuPanel) {
            surface.set_visible(Element::MenuPanel, !visible);
        }
    }

    /// Click anywhere outside the menu: close it if open.
    pub fn dismiss_menu(&self) {
        let surface = &self.inner.surface;
        if surface.is_visible(Element::MenuPanel) == Some(true) {
            surface.set_visible(Element::MenuPanel, false);
        }
    }

    pub fn is_menu_open(&self) -> bool {
        self.inner.surface.is_visible(Element::MenuPanel) == Some(true)
    }
}
