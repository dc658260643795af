use iced::Color;

// Background colors
pub const BG_DARK: Color = Color::from_rgb(0.04, 0.04, 0.06);
pub const BG_CARD: Color = Color::from_rgb(0.09, 0.11, 0.15);

// Stroke/border colors
pub const STROKE_DIM: Color = Color::from_rgb(0.2, 0.2, 0.2);

// Accent colors
pub const ACCENT_ORANGE: Color = Color::from_rgb(1.0, 0.584, 0.0);
pub const ACCENT_BLUE: Color = Color::from_rgb(0.35, 0.65, 0.95);

// Text colors
pub const TEXT_BRIGHT: Color = Color::from_rgb(0.96, 0.97, 0.99);
pub const TEXT_MUTED: Color = Color::from_rgb(0.6, 0.63, 0.7);
