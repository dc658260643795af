use crate::report::{Breakdown, DailyReport, OperationCategory};
use crate::traits::{Element, Surface};

/// Push a normalized report into every display surface.
///
/// Absent surfaces are skipped by the `Surface` implementation, so a page
/// with missing widgets still renders everything it does have.
pub fn render_report<S: Surface + ?Sized>(surface: &S, report: &DailyReport) {
    surface.set_text(Element::StartTime, &report.start_time);
    surface.set_text(Element::EndTime, &report.end_time);
    surface.set_text(Element::WorkingHours, &report.working_hours);
    surface.set_text(Element::UtilizedHours, &report.utilized_hours);

    render_utilization(surface, report.utilization_percent);
    render_breakdown(surface, &report.breakdown);
}

/// Fill the radial indicator and echo the percentage as centered text.
pub fn render_utilization<S: Surface + ?Sized>(surface: &S, percent: u8) {
    let percent = percent.min(100);
    surface.set_fill(Element::UtilizationGauge, percent);
    surface.set_text(Element::UtilizationText, &format_percent(percent));
}

pub fn render_breakdown<S: Surface + ?Sized>(surface: &S, breakdown: &Breakdown) {
    for category in OperationCategory::ALL {
        surface.set_text(Element::Operation(category), breakdown.duration(category));
    }
}

pub fn format_percent(percent: u8) -> String {
    format!("{}%", percent)
}

/// Angle in degrees covered by the filled arc: 0 at 0%, a full turn at 100%.
pub fn sweep_degrees(percent: u8) -> f32 {
    f32::from(percent.min(100)) / 100.0 * 360.0
}
