use iced::{
    Rectangle, Renderer, Theme, mouse,
    widget::canvas::{self, Path, Stroke, Text},
};

use crate::render::sweep_degrees;
use crate::style;

/// Circular utilization indicator: a track ring, an arc filled clockwise
/// from twelve o'clock in proportion to `percent`, and `label` centered.
pub struct UtilizationGauge<'a> {
    pub percent: u8,
    pub label: String,
    pub cache: &'a canvas::Cache,
}

impl<'a, Message> canvas::Program<Message> for UtilizationGauge<'a> {
    type State = ();

    fn draw(
        &self,
        _: &Self::State,
        renderer: &Renderer,
        _: &Theme,
        bounds: Rectangle,
        _: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let geo = self.cache.draw(renderer, bounds.size(), |frame| {
            let center = frame.center();
            let radius = bounds.width.min(bounds.height) / 2.0 - 12.0;
            let width = 18.0;

            let track = Path::new(|b| {
                b.arc(canvas::path::Arc {
                    center,
                    radius,
                    start_angle: 0.0.into(),
                    end_angle: 360.0f32.to_radians().into(),
                })
            });
            frame.stroke(
                &track,
                Stroke::default()
                    .with_color(style::STROKE_DIM)
                    .with_width(width),
            );

            let sweep = sweep_degrees(self.percent);
            if sweep > 0.0 {
                let fill = Path::new(|b| {
                    b.arc(canvas::path::Arc {
                        center,
                        radius,
                        start_angle: (-90.0f32).to_radians().into(),
                        end_angle: (sweep - 90.0).to_radians().into(),
                    })
                });
                frame.stroke(
                    &fill,
                    Stroke::default()
                        .with_color(style::ACCENT_ORANGE)
                        .with_width(width),
                );
            }

            frame.fill_text(Text {
                content: self.label.clone(),
                position: center,
                color: style::TEXT_BRIGHT,
                size: 44.0.into(),
                align_x: iced::alignment::Horizontal::Center.into(),
                align_y: iced::alignment::Vertical::Center,
                ..Default::default()
            });
        });
        vec![geo]
    }
}
