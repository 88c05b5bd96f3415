//! Effective style resolution.
//!
//! Every style field resolves through a fixed chain: the slide's own value
//! if present, else the flow's [`GlobalStyles`] value, else the hardcoded
//! default below. No other source is consulted.

use serde::Serialize;

use crate::slide::Slide;
use crate::style::{
    Animation, ButtonIcon, ButtonPosition, ButtonSize, FontSize, GlobalStyles, ProgressBarHeight,
    StyleOverrides, DEFAULT_ACCENT_COLOR, DEFAULT_BUTTON_TEXT_COLOR,
};

// ---------------------------------------------------------------------------
// Hardcoded defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_FONT_SIZE: FontSize = FontSize::Medium;
pub const DEFAULT_PROGRESS_BAR_HEIGHT: ProgressBarHeight = ProgressBarHeight::Thin;
pub const DEFAULT_BUTTON_ICON: ButtonIcon = ButtonIcon::ArrowRight;
pub const DEFAULT_BUTTON_SIZE: ButtonSize = ButtonSize::Medium;
pub const DEFAULT_BUTTON_POSITION: ButtonPosition = ButtonPosition::Bottom;
pub const DEFAULT_ANIMATION: Animation = Animation::None;
pub const DEFAULT_SHOW_PROGRESS_BAR: bool = true;

// ---------------------------------------------------------------------------
// Background
// ---------------------------------------------------------------------------

/// The single background a slide renders with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Background {
    Gradient(String),
    Image(String),
    Color(String),
    None,
}

impl Background {
    /// Pick one background by visual precedence: gradient, image, color.
    pub fn from_fields(
        gradient: Option<&str>,
        image: Option<&str>,
        color: Option<&str>,
    ) -> Self {
        let present = |v: Option<&str>| v.filter(|s| !s.trim().is_empty()).map(str::to_string);
        if let Some(g) = present(gradient) {
            Self::Gradient(g)
        } else if let Some(i) = present(image) {
            Self::Image(i)
        } else if let Some(c) = present(color) {
            Self::Color(c)
        } else {
            Self::None
        }
    }

    /// Inline CSS declarations for this background.
    pub fn css(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Gradient(g) => vec![("background", g.clone())],
            Self::Image(url) => vec![
                ("background-image", format!("url({url})")),
                ("background-size", "cover".into()),
                ("background-position", "center".into()),
            ],
            Self::Color(c) => vec![("background-color", c.clone())],
            Self::None => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolved style
// ---------------------------------------------------------------------------

/// The effective style of one slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    pub background: Background,
    pub title_color: Option<String>,
    pub description_color: Option<String>,
    pub title_font_size: FontSize,
    pub description_font_size: FontSize,
    pub button_color: String,
    pub button_text_color: String,
    pub button_position: ButtonPosition,
    pub button_icon: ButtonIcon,
    pub button_size: ButtonSize,
    pub button_full_width: bool,
    pub rounded_corners: bool,
    pub progress_bar_color: String,
    pub progress_bar_height: ProgressBarHeight,
    pub progress_percentage: Option<f64>,
    pub show_progress_bar: bool,
    pub animation: Animation,
}

/// Overlay a slide's overrides on the global record, field by field.
pub fn merge(slide: &StyleOverrides, global: &StyleOverrides) -> StyleOverrides {
    fn pick<T: Clone>(own: &Option<T>, inherited: &Option<T>) -> Option<T> {
        own.clone().or_else(|| inherited.clone())
    }

    StyleOverrides {
        background_color: pick(&slide.background_color, &global.background_color),
        background_gradient: pick(&slide.background_gradient, &global.background_gradient),
        background_image: pick(&slide.background_image, &global.background_image),
        title_color: pick(&slide.title_color, &global.title_color),
        description_color: pick(&slide.description_color, &global.description_color),
        title_font_size: pick(&slide.title_font_size, &global.title_font_size),
        description_font_size: pick(&slide.description_font_size, &global.description_font_size),
        button_color: pick(&slide.button_color, &global.button_color),
        button_text_color: pick(&slide.button_text_color, &global.button_text_color),
        button_position: pick(&slide.button_position, &global.button_position),
        button_icon: pick(&slide.button_icon, &global.button_icon),
        button_size: pick(&slide.button_size, &global.button_size),
        button_full_width: pick(&slide.button_full_width, &global.button_full_width),
        rounded_corners: pick(&slide.rounded_corners, &global.rounded_corners),
        progress_bar_color: pick(&slide.progress_bar_color, &global.progress_bar_color),
        progress_bar_height: pick(&slide.progress_bar_height, &global.progress_bar_height),
        progress_percentage: pick(&slide.progress_percentage, &global.progress_percentage),
        show_progress_bar: pick(&slide.show_progress_bar, &global.show_progress_bar),
        animation: pick(&slide.animation, &global.animation),
    }
}

/// Compute the effective style of `slide` under `globals`.
pub fn resolve(slide: &Slide, globals: &GlobalStyles) -> ResolvedStyle {
    let merged = merge(&slide.style, &globals.styles);

    ResolvedStyle {
        background: Background::from_fields(
            merged.background_gradient.as_deref(),
            merged.background_image.as_deref(),
            merged.background_color.as_deref(),
        ),
        title_color: merged.title_color,
        description_color: merged.description_color,
        title_font_size: merged.title_font_size.unwrap_or(DEFAULT_FONT_SIZE),
        description_font_size: merged.description_font_size.unwrap_or(DEFAULT_FONT_SIZE),
        button_color: merged
            .button_color
            .unwrap_or_else(|| DEFAULT_ACCENT_COLOR.to_string()),
        button_text_color: merged
            .button_text_color
            .unwrap_or_else(|| DEFAULT_BUTTON_TEXT_COLOR.to_string()),
        button_position: merged.button_position.unwrap_or(DEFAULT_BUTTON_POSITION),
        button_icon: merged.button_icon.unwrap_or(DEFAULT_BUTTON_ICON),
        button_size: merged.button_size.unwrap_or(DEFAULT_BUTTON_SIZE),
        button_full_width: merged.button_full_width.unwrap_or(false),
        rounded_corners: merged.rounded_corners.unwrap_or(false),
        progress_bar_color: merged
            .progress_bar_color
            .unwrap_or_else(|| DEFAULT_ACCENT_COLOR.to_string()),
        progress_bar_height: merged
            .progress_bar_height
            .unwrap_or(DEFAULT_PROGRESS_BAR_HEIGHT),
        progress_percentage: merged.progress_percentage,
        show_progress_bar: merged.show_progress_bar.unwrap_or(DEFAULT_SHOW_PROGRESS_BAR),
        animation: merged.animation.unwrap_or(DEFAULT_ANIMATION),
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Percentage for the slide at `index` (0-based) of `total`.
pub fn computed_progress(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = ((index + 1) as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// The value the progress bar displays, or `None` when it is hidden.
///
/// An explicit `progressPercentage` wins (clamped to 0..=100); otherwise the
/// value is derived from the slide's position in the flow.
pub fn progress_value(style: &ResolvedStyle, index: usize, total: usize) -> Option<u8> {
    if !style.show_progress_bar {
        return None;
    }
    match style.progress_percentage {
        Some(explicit) if explicit.is_finite() => Some(explicit.round().clamp(0.0, 100.0) as u8),
        _ => Some(computed_progress(index, total)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
