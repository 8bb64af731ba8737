//! Colors and sizes layered over the built-in light and dark themes.

use iced::Color;

pub mod colors {
    use iced::Color;

    /// Dims the window behind a modal.
    pub const BACKDROP: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.6);
    /// Confirmed tools, finished runs.
    pub const SUCCESS: Color = Color::from_rgb(0.30, 0.65, 0.30);
    /// Rejected parameter values, failed runs.
    pub const ERROR: Color = Color::from_rgb(0.85, 0.30, 0.30);
    /// Unsaved changes.
    pub const WARNING: Color = Color::from_rgb(0.85, 0.65, 0.20);
    /// Hints and empty placeholders.
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.53, 0.53, 0.53);
}

/// Padding and gaps in logical pixels.
pub mod spacing {
    pub const XS: u16 = 4;
    pub const SM: u16 = 8;
    pub const MD: u16 = 12;
    pub const LG: u16 = 16;
    pub const XL: u16 = 24;
}

/// Text sizes. `NORMAL` is the table and form size.
pub mod font {
    pub const SM: u16 = 11;
    pub const NORMAL: u16 = 13;
    pub const LG: u16 = 16;
    pub const HEADER: u16 = 18;
}

/// Accent for a tool's confirmation status.
pub fn status_color(confirmed: bool) -> Color {
    if confirmed {
        colors::SUCCESS
    } else {
        colors::ERROR
    }
}
