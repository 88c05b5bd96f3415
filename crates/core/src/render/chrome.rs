//! Screen chrome around slide content: progress bar, back control, the
//! continue button, and the icon set they draw from.

use crate::navigation::COMPLETION_TOAST;
use crate::style::ButtonIcon;

use super::classes;
use super::view::Element;
use super::RenderContext;

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    ArrowRight,
    ChevronRight,
    ChevronDown,
    ChevronLeft,
    Check,
    Calendar,
    Image,
    Video,
}

impl Icon {
    pub fn name(self) -> &'static str {
        match self {
            Self::ArrowRight => "arrow-right",
            Self::ChevronRight => "chevron-right",
            Self::ChevronDown => "chevron-down",
            Self::ChevronLeft => "chevron-left",
            Self::Check => "check",
            Self::Calendar => "calendar",
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    fn paths(self) -> &'static [&'static str] {
        match self {
            Self::ArrowRight => &["M5 12h14", "m12 5 7 7-7 7"],
            Self::ChevronRight => &["m9 18 6-6-6-6"],
            Self::ChevronDown => &["m6 9 6 6 6-6"],
            Self::ChevronLeft => &["m15 18-6-6 6-6"],
            Self::Check => &["M20 6 9 17l-5-5"],
            Self::Calendar => &[
                "M8 2v4",
                "M16 2v4",
                "M3 10h18",
                "M5 4h14a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V6a2 2 0 0 1 2-2z",
            ],
            Self::Image => &[
                "M5 3h14a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2z",
                "M9 9m-2 0a2 2 0 1 0 4 0a2 2 0 1 0-4 0",
                "m21 15-3.086-3.086a2 2 0 0 0-2.828 0L6 21",
            ],
            Self::Video => &[
                "M14.752 11.168l-3.197-2.132A1 1 0 0010 9.87v4.263a1 1 0 001.555.832l3.197-2.132a1 1 0 000-1.664z",
                "M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
            ],
        }
    }

    pub fn for_button(icon: ButtonIcon) -> Option<Self> {
        match icon {
            ButtonIcon::ArrowRight => Some(Self::ArrowRight),
            ButtonIcon::ChevronRight => Some(Self::ChevronRight),
            ButtonIcon::ChevronDown => Some(Self::ChevronDown),
            ButtonIcon::None => None,
        }
    }

    pub fn view(self, classes: &str) -> Element {
        Element::new("svg")
            .class(classes)
            .attr("data-icon", self.name())
            .attr("viewBox", "0 0 24 24")
            .attr("fill", "none")
            .attr("stroke", "currentColor")
            .attr("stroke-width", "2")
            .attr("stroke-linecap", "round")
            .attr("stroke-linejoin", "round")
            .attr("aria-hidden", "true")
            .children(
                self.paths()
                    .iter()
                    .map(|d| Element::new("path").attr("d", *d)),
            )
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Back control plus progress bar. `None` when neither is shown.
pub fn top_bar(ctx: &RenderContext<'_>, progress: Option<u8>) -> Option<Element> {
    let back = (ctx.index > 0).then(|| back_control(ctx.links.back.as_deref()));
    if back.is_none() && progress.is_none() {
        return None;
    }

    Some(
        Element::new("div")
            .class("flex items-center gap-3 px-4 pt-4")
            .child_opt(back)
            .child_opt(progress.map(|value| progress_bar(ctx, value))),
    )
}

pub fn progress_bar(ctx: &RenderContext<'_>, value: u8) -> Element {
    let style = ctx.resolved;
    Element::new("div")
        .class("progress-track flex-1")
        .class(classes::progress_bar_height(style.progress_bar_height))
        .style("--progress-bar-color", style.progress_bar_color.clone())
        .attr("role", "progressbar")
        .attr("aria-valuemin", "0")
        .attr("aria-valuemax", "100")
        .attr("aria-valuenow", value.to_string())
        .child(
            Element::new("div")
                .class("progress-fill")
                .style("width", format!("{value}%")),
        )
}

pub fn back_control(href: Option<&str>) -> Element {
    let control = match href {
        Some(href) => Element::new("a").attr("href", href),
        None => Element::new("button").attr("type", "button"),
    };
    control
        .class("shrink-0 p-1 text-gray-700")
        .attr("aria-label", "Back")
        .attr("data-action", "back")
        .child(Icon::ChevronLeft.view("h-5 w-5"))
}

// ---------------------------------------------------------------------------
// Continue button
// ---------------------------------------------------------------------------

pub const CONTINUE_LABEL: &str = "Continue";

pub fn continue_button(ctx: &RenderContext<'_>) -> Element {
    let style = ctx.resolved;
    let is_last = ctx.index + 1 >= ctx.total;

    let button = match (&ctx.links.next, is_last) {
        (Some(href), false) => Element::new("a").attr("href", href),
        _ => Element::new("button").attr("type", "button"),
    };

    let button = if is_last {
        if ctx.mode.is_embedded() {
            button.attr("data-action", "complete")
        } else {
            button
                .attr("data-action", "toast")
                .attr("data-toast", COMPLETION_TOAST)
        }
    } else {
        button.attr("data-action", "continue")
    };

    let button = button
        .class("inline-flex items-center justify-center font-medium")
        .class(if style.rounded_corners {
            "rounded-lg"
        } else {
            "rounded-md"
        })
        .class(classes::button_size(style.button_size))
        .class_if(style.button_full_width, "w-full")
        .style("background-color", style.button_color.clone())
        .style("color", style.button_text_color.clone())
        .text(CONTINUE_LABEL)
        .child_opt(Icon::for_button(style.button_icon).map(|icon| icon.view("ml-2 h-4 w-4")));

    Element::new("div")
        .class(classes::button_container(style.button_position))
        .class_if(style.button_full_width, "w-full")
        .child(button)
}
