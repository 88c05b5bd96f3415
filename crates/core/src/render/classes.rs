//! Utility class names for style and layout values.

use crate::slide::{HorizontalAlignment, VerticalAlignment};
use crate::style::{ButtonPosition, ButtonSize, FontSize, ProgressBarHeight};

pub fn title_font_size(size: FontSize) -> &'static str {
    match size {
        FontSize::Small => "text-xl",
        FontSize::Medium => "text-2xl",
        FontSize::Large => "text-4xl",
    }
}

pub fn description_font_size(size: FontSize) -> &'static str {
    match size {
        FontSize::Small => "text-sm",
        FontSize::Medium => "text-base",
        FontSize::Large => "text-xl",
    }
}

pub fn button_size(size: ButtonSize) -> &'static str {
    match size {
        ButtonSize::Small => "h-8 px-3 text-xs",
        ButtonSize::Medium => "h-10 px-4 text-sm",
        ButtonSize::Large => "h-12 px-6 text-base",
    }
}

pub fn button_container(position: ButtonPosition) -> &'static str {
    match position {
        ButtonPosition::BelowContent => "flex justify-center mt-6",
        ButtonPosition::Bottom => "flex justify-center pb-6 mt-auto",
    }
}

pub fn progress_bar_height(height: ProgressBarHeight) -> &'static str {
    match height {
        ProgressBarHeight::Thin => "h-1",
        ProgressBarHeight::Medium => "h-1.5",
        ProgressBarHeight::Thick => "h-2",
    }
}

pub fn vertical_alignment(alignment: VerticalAlignment) -> &'static str {
    match alignment {
        VerticalAlignment::Top => "justify-start pt-20",
        VerticalAlignment::Center => "justify-center",
        VerticalAlignment::Bottom => "justify-end pb-20",
    }
}

pub fn horizontal_alignment(alignment: HorizontalAlignment) -> &'static str {
    match alignment {
        HorizontalAlignment::Left => "items-start text-left",
        HorizontalAlignment::Center => "items-center text-center",
        HorizontalAlignment::Right => "items-end text-right",
    }
}

/// Corner radius used by option buttons, inputs and media.
pub fn rounded(enabled: bool) -> &'static str {
    if enabled {
        "rounded-lg"
    } else {
        ""
    }
}
