//! Abstractions over the presentation layer.
//!
//! This module provides:
//! - `Element`: the stable logical names of every display surface
//! - `Surface`: write access to those surfaces, where any of them may be absent
//! - `MockSurface`: a recording implementation for tests

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::report::OperationCategory;

// ==================== Elements ====================

/// Logical name of a display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    LoadingIndicator,
    DateSelector,
    StartTime,
    EndTime,
    WorkingHours,
    UtilizedHours,
    /// Radial indicator whose filled arc tracks the utilization percentage.
    UtilizationGauge,
    /// Numeric overlay centered on the gauge.
    UtilizationText,
    Operation(OperationCategory),
    MenuToggle,
    MenuPanel,
}

impl Element {
    pub const ALL: [Element; 14] = [
        Element::LoadingIndicator,
        Element::DateSelector,
        Element::StartTime,
        Element::EndTime,
        Element::WorkingHours,
        Element::UtilizedHours,
        Element::UtilizationGauge,
        Element::UtilizationText,
        Element::Operation(OperationCategory::MovingWithLoad),
        Element::Operation(OperationCategory::MovingWithoutLoad),
        Element::Operation(OperationCategory::IdleWithLoad),
        Element::Operation(OperationCategory::IdleWithoutLoad),
        Element::MenuToggle,
        Element::MenuPanel,
    ];
}

// ==================== Surface Trait ====================

/// Write access to the rendered page.
///
/// Every element is optional. Writing to an element the page does not have
/// is a silent no-op, never an error.
pub trait Surface: Send + Sync {
    /// Whether the page currently has this element.
    fn has(&self, element: Element) -> bool;

    fn set_text(&self, element: Element, value: &str);

    fn set_visible(&self, element: Element, visible: bool);

    /// `None` when the element is absent.
    fn is_visible(&self, element: Element) -> Option<bool>;

    /// Fill a radial indicator to `percent` (0 empty, 100 full circle).
    fn set_fill(&self, element: Element, percent: u8);

    /// Replace a list control's entries and choose the selected one.
    fn set_options(&self, element: Element, options: &[String], selected: Option<&str>);

    /// Change the selected entry of a list control without touching its entries.
    fn set_selected(&self, element: Element, value: &str);
}

// ==================== Mock Surface ====================

/// A single write observed by `MockSurface`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceWrite {
    Text(Element, String),
    Visible(Element, bool),
    Fill(Element, u8),
    Options(Element, Vec<String>, Option<String>),
    Selected(Element, String),
}

#[derive(Debug, Default)]
struct MockState {
    writes: Vec<SurfaceWrite>,
    visible: HashMap<Element, bool>,
}

/// Mock surface for testing that records every write made to a present element.
#[derive(Debug, Clone, Default)]
pub struct MockSurface {
    missing: Arc<HashSet<Element>>,
    state: Arc<Mutex<MockState>>,
}

impl MockSurface {
    /// Create a mock surface where every element exists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock surface lacking the given elements.
    pub fn without(missing: &[Element]) -> Self {
        Self {
            missing: Arc::new(missing.iter().copied().collect()),
            state: Arc::default(),
        }
    }

    /// All writes recorded so far, in order.
    pub fn writes(&self) -> Vec<SurfaceWrite> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.state.lock().unwrap().writes.len()
    }

    /// The last text written to `element`, if any.
    pub fn last_text(&self, element: Element) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .writes
            .iter()
            .rev()
            .find_map(|w| match w {
                SurfaceWrite::Text(e, v) if *e == element => Some(v.clone()),
                _ => None,
            })
    }

    /// Clear recorded writes.
    pub fn clear(&self) {
        self.state.lock().unwrap().writes.clear();
    }

    fn record(&self, element: Element, write: SurfaceWrite) {
        if self.missing.contains(&element) {
            return;
        }
        self.state.lock().unwrap().writes.push(write);
    }
}

impl Surface for MockSurface {
    fn has(&self, element: Element) -> bool {
        !self.missing.contains(&element)
    }

    fn set_text(&self, element: Element, value: &str) {
        self.record(element, SurfaceWrite::Text(element, value.to_string()));
    }

    fn set_visible(&self, element: Element, visible: bool) {
        if !self.has(element) {
            return;
        }
        let mut state = self.state.lock().unwrap();
        state.visible.insert(element, visible);
        state.writes.push(SurfaceWrite::Visible(element, visible));
    }

    fn is_visible(&self, element: Element) -> Option<bool> {
        if !self.has(element) {
            return None;
        }
        let state = self.state.lock().unwrap();
        Some(state.visible.get(&element).copied().unwrap_or(false))
    }

    fn set_fill(&self, element: Element, percent: u8) {
        self.record(element, SurfaceWrite::Fill(element, percent));
    }

    fn set_options(&self, element: Element, options: &[String], selected: Option<&str>) {
        self.record(
            element,
            SurfaceWrite::Options(element, options.to_vec(), selected.map(str::to_string)),
        );
    }

    fn set_selected(&self, element: Element, value: &str) {
        self.record(element, SurfaceWrite::Selected(element, value.to_string()));
    }
}
