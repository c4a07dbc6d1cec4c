//! Visual and layout defaults.
//!
//! A [`Theme`] is a plain value handed to constructors that need defaults
//! (`PrecisionLayout::themed`, `ScrollArea::new`, `Window::open`, ...).
//! Applications that want one process-wide theme install it once with
//! [`init`] and read it back with [`current`].

use crate::error::{UiError, UiResult};
use crate::graphics::FontDesc;
use std::sync::OnceLock;
use std::time::Duration;
use trellis_core::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub window_background: Color,
    pub content_background: Color,
    pub text_color: Color,
    pub border_color: Color,
    pub focus_color: Color,
    pub label_font: FontDesc,
    pub precision: PrecisionDefaults,
    pub flow: FlowDefaults,
    pub scroll_bar: ScrollBarTheme,
    /// Distance scrolled per wheel notch or arrow key.
    pub scroll_line_amount: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            window_background: Color::from_hex(0xECECEC),
            content_background: Color::WHITE,
            text_color: Color::BLACK,
            border_color: Color::from_hex(0xA0A0A0),
            focus_color: Color::from_hex(0x3875D7),
            label_font: FontDesc::default(),
            precision: PrecisionDefaults::default(),
            flow: FlowDefaults::default(),
            scroll_bar: ScrollBarTheme::default(),
            scroll_line_amount: 16.0,
        }
    }
}

/// Spacing used by `PrecisionLayout::themed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecisionDefaults {
    pub h_spacing: f32,
    pub v_spacing: f32,
}

impl Default for PrecisionDefaults {
    fn default() -> Self {
        Self {
            h_spacing: 4.0,
            v_spacing: 2.0,
        }
    }
}

/// Gaps used by `FlowLayout::themed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowDefaults {
    pub h_gap: f32,
    pub v_gap: f32,
}

impl Default for FlowDefaults {
    fn default() -> Self {
        Self { h_gap: 2.0, v_gap: 2.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollBarTheme {
    /// Thickness of the bar.
    pub size: f32,
    /// Smallest thumb length, as a fraction of the bar's thickness.
    pub min_thumb_ratio: f32,
    /// Delay before a held line/page button starts repeating.
    pub initial_repeat_delay: Duration,
    /// Interval between repeats once repeating.
    pub repeat_delay: Duration,
    pub track_color: Color,
    pub thumb_color: Color,
    pub pressed_color: Color,
    pub outline_color: Color,
    pub arrow_color: Color,
}

impl Default for ScrollBarTheme {
    fn default() -> Self {
        Self {
            size: 16.0,
            min_thumb_ratio: 0.75,
            initial_repeat_delay: Duration::from_millis(250),
            repeat_delay: Duration::from_millis(75),
            track_color: Color::from_hex(0xF0F0F0),
            thumb_color: Color::from_hex(0xC8C8C8),
            pressed_color: Color::from_hex(0x9A9A9A),
            outline_color: Color::from_hex(0xB0B0B0),
            arrow_color: Color::from_hex(0x505050),
        }
    }
}

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the process-wide theme. Fails if one is already installed,
/// including the default installed by an earlier call to [`current`].
pub fn init(theme: Theme) -> UiResult<()> {
    THEME.set(theme).map_err(|_| UiError::ThemeAlreadyInitialized)
}

/// The process-wide theme, installing the default on first use.
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}
