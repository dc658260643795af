//! Retained in-memory model of the dashboard page.
//!
//! `PageModel` is the `Surface` the application writes into. The GUI view
//! and the headless logger both read it back through `PageSnapshot`.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::report::OperationCategory;
use crate::traits::{Element, Surface};

/// State of one element on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    pub text: String,
    pub visible: bool,
    pub fill: u8,
    pub options: Vec<String>,
    pub selected: Option<String>,
}

/// Thread-safe handle to the page. Clones share the same page.
#[derive(Debug, Clone)]
pub struct PageModel {
    elements: Arc<Mutex<BTreeMap<Element, ElementState>>>,
}

impl PageModel {
    /// A page with every element present. The loading indicator and the
    /// menu panel start hidden.
    pub fn new() -> Self {
        Self::without(&[])
    }

    /// A page lacking the given elements.
    pub fn without(missing: &[Element]) -> Self {
        let elements = Element::ALL
            .iter()
            .filter(|e| !missing.contains(e))
            .map(|&e| {
                let visible = !matches!(e, Element::LoadingIndicator | Element::MenuPanel);
                (
                    e,
                    ElementState {
                        visible,
                        ..Default::default()
                    },
                )
            })
            .collect();

        Self {
            elements: Arc::new(Mutex::new(elements)),
        }
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            elements: self.elements.lock().unwrap().clone(),
        }
    }

    fn with_element(&self, element: Element, f: impl FnOnce(&mut ElementState)) {
        if let Some(state) = self.elements.lock().unwrap().get_mut(&element) {
            f(state);
        }
    }
}

impl Default for PageModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for PageModel {
    fn has(&self, element: Element) -> bool {
        self.elements.lock().unwrap().contains_key(&element)
    }

    fn set_text(&self, element: Element, value: &str) {
        self.with_element(element, |s| s.text = value.to_string());
    }

    fn set_visible(&self, element: Element, visible: bool) {
        self.with_element(element, |s| s.visible = visible);
    }

    fn is_visible(&self, element: Element) -> Option<bool> {
        self.elements.lock().unwrap().get(&element).map(|s| s.visible)
    }

    fn set_fill(&self, element: Element, percent: u8) {
        self.with_element(element, |s| s.fill = percent.min(100));
    }

    fn set_options(&self, element: Element, options: &[String], selected: Option<&str>) {
        self.with_element(element, |s| {
            s.options = options.to_vec();
            s.selected = selected.map(str::to_string);
        });
    }

    fn set_selected(&self, element: Element, value: &str) {
        self.with_element(element, |s| s.selected = Some(value.to_string()));
    }
}

/// Point-in-time copy of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    elements: BTreeMap<Element, ElementState>,
}

impl PageSnapshot {
    pub fn has(&self, element: Element) -> bool {
        self.elements.contains_key(&element)
    }

    pub fn element(&self, element: Element) -> Option<&ElementState> {
        self.elements.get(&element)
    }

    /// Text of `element`, empty when absent or never written.
    pub fn text(&self, element: Element) -> &str {
        self.element(element).map(|s| s.text.as_str()).unwrap_or("")
    }

    pub fn is_visible(&self, element: Element) -> bool {
        self.element(element).is_some_and(|s| s.visible)
    }

    pub fn fill(&self, element: Element) -> u8 {
        self.element(element).map(|s| s.fill).unwrap_or(0)
    }

    pub fn options(&self, element: Element) -> &[String] {
        self.element(element)
            .map(|s| s.options.as_slice())
            .unwrap_or(&[])
    }

    pub fn selected(&self, element: Element) -> Option<&str> {
        self.element(element).and_then(|s| s.selected.as_deref())
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        let operations = OperationCategory::ALL
            .iter()
            .map(|&c| format!("{}={}", c.key(), self.text(Element::Operation(c))))
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            "date={} start={} end={} working={} utilized={} utilization={} {}",
            self.selected(Element::DateSelector).unwrap_or("-"),
            self.text(Element::StartTime),
            self.text(Element::EndTime),
            self.text(Element::WorkingHours),
            self.text(Element::UtilizedHours),
            self.text(Element::UtilizationText),
            operations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page_has_every_element() {
        let snapshot = PageModel::new().snapshot();
        for element in Element::ALL {
            assert!(snapshot.has(element), "{:?} should exist", element);
        }
    }

    #[test]
    fn test_loading_and_menu_start_hidden() {
        let snapshot = PageModel::new().snapshot();
        assert!(!snapshot.is_visible(Element::LoadingIndicator));
        assert!(!snapshot.is_visible(Element::MenuPanel));
        assert!(snapshot.is_visible(Element::MenuToggle));
    }

    #[test]
    fn test_writes_to_missing_elements_are_noops() {
        let page = PageModel::without(&[Element::StartTime, Element::UtilizationGauge]);

        page.set_text(Element::StartTime, "06:00");
        page.set_fill(Element::UtilizationGauge, 50);
        page.set_text(Element::EndTime, "16:00");

        let snapshot = page.snapshot();
        assert!(!snapshot.has(Element::StartTime));
        assert_eq!(snapshot.text(Element::StartTime), "");
        assert_eq!(snapshot.fill(Element::UtilizationGauge), 0);
        assert_eq!(snapshot.text(Element::EndTime), "16:00");
        assert_eq!(page.is_visible(Element::StartTime), None);
    }

    #[test]
    fn test_set_options_replaces_entries() {
        let page = PageModel::new();
        let first = vec!["01/01/2024".to_string(), "02/01/2024".to_string()];
        let second = vec!["03/01/2024".to_string()];

        page.set_options(Element::DateSelector, &first, Some("02/01/2024"));
        page.set_options(Element::DateSelector, &second, Some("03/01/2024"));

        let snapshot = page.snapshot();
        assert_eq!(snapshot.options(Element::DateSelector), second.as_slice());
        assert_eq!(snapshot.selected(Element::DateSelector), Some("03/01/2024"));
    }

    #[test]
    fn test_fill_is_capped() {
        let page = PageModel::new();
        page.set_fill(Element::UtilizationGauge, 250);
        assert_eq!(page.snapshot().fill(Element::UtilizationGauge), 100);
    }

    #[test]
    fn test_clones_share_state() {
        let page = PageModel::new();
        let other = page.clone();
        other.set_text(Element::WorkingHours, "9:00");
        assert_eq!(page.snapshot().text(Element::WorkingHours), "9:00");
    }

    #[test]
    fn test_summary_mentions_values() {
        let page = PageModel::new();
        page.set_selected(Element::DateSelector, "05/03/2024");
        page.set_text(Element::UtilizationText, "78%");
        page.set_text(Element::Operation(OperationCategory::IdleWithLoad), "01:00");

        let summary = page.snapshot().summary();
        assert!(summary.contains("date=05/03/2024"));
        assert!(summary.contains("utilization=78%"));
        assert!(summary.contains("idle_with_load=01:00"));
    }
}
