//! Slide rendering.
//!
//! [`render_slide`] turns one slide plus its resolved style into a
//! [`ViewNode`] tree for the phone screen: background, top bar, animated
//! content column, and the continue button. [`html`] serializes trees and
//! wraps them into pages.

pub mod chrome;
pub mod classes;
pub mod content;
pub mod html;
pub mod pages;
pub mod view;

use serde::Serialize;

use crate::animation::AnimationPhase;
use crate::navigation::PreviewMode;
use crate::resolve::{progress_value, ResolvedStyle};
use crate::response::Selections;
use crate::slide::{non_empty, Slide};

pub use view::{Element, ViewNode};

/// Query parameter carrying a submitted answer.
pub const ANSWER_FIELD: &str = "answer";

/// Hrefs for server-driven navigation. Absent links render as buttons that
/// the page script or host handles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavLinks {
    pub back: Option<String>,
    pub next: Option<String>,
    /// When set, choice, input and date controls submit their answer to the
    /// page through this form.
    pub answer: Option<AnswerForm>,
}

/// A GET form that re-requests the current page with `answer=<value>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerForm {
    pub action: String,
    /// Hidden query fields, e.g. `slide` and `sdk`.
    pub fields: Vec<(String, String)>,
}

/// Everything needed to draw one slide.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub slide: &'a Slide,
    pub resolved: &'a ResolvedStyle,
    pub index: usize,
    pub total: usize,
    pub phase: AnimationPhase,
    pub mode: PreviewMode,
    pub selections: &'a Selections,
    pub links: NavLinks,
}

impl RenderContext<'_> {
    pub fn progress(&self) -> Option<u8> {
        progress_value(self.resolved, self.index, self.total)
    }
}

/// Render the phone screen for `ctx.slide`.
pub fn render_slide(ctx: &RenderContext<'_>) -> ViewNode {
    let slide = ctx.slide;
    let style = ctx.resolved;
    let button_below = style.button_position == crate::style::ButtonPosition::BelowContent;

    let title = non_empty(slide.title.as_deref()).map(|title| {
        Element::new("h2")
            .class("font-bold mb-4")
            .class(classes::title_font_size(style.title_font_size))
            .style_opt("color", style.title_color.as_deref())
            .text(title)
    });

    let description = non_empty(slide.description.as_deref()).map(|description| {
        Element::new("p")
            .class("mb-6")
            .class(classes::description_font_size(style.description_font_size))
            .style_opt("color", style.description_color.as_deref())
            .text(description)
    });

    let animation_class = if ctx.phase.applies_class() {
        style.animation.css_class()
    } else {
        ""
    };

    let column = Element::new("div")
        .class("flex flex-col max-w-[280px] w-full mx-auto")
        .class(classes::horizontal_alignment(slide.horizontal_alignment))
        .class(animation_class)
        .attr("data-phase", phase_name(ctx.phase))
        .child_opt(title)
        .child_opt(description)
        .child_opt(content::type_content(ctx))
        .child_opt(button_below.then(|| chrome::continue_button(ctx)));

    let body = Element::new("div")
        .class("flex-1 flex flex-col px-8 w-full")
        .class(classes::vertical_alignment(slide.vertical_alignment))
        .class(classes::horizontal_alignment(slide.horizontal_alignment))
        .child(column);

    Element::new("div")
        .class("slide-screen flex flex-col h-full w-full")
        .attr("data-slide-id", slide.id.clone())
        .attr("data-slide-type", slide.slide_type.as_str())
        .attr("data-index", ctx.index.to_string())
        .styles(style.background.css())
        .child_opt(chrome::top_bar(ctx, ctx.progress()))
        .child(body)
        .child_opt((!button_below).then(|| chrome::continue_button(ctx)))
        .into()
}

fn phase_name(phase: AnimationPhase) -> &'static str {
    match phase {
        AnimationPhase::Entering => "entering",
        AnimationPhase::Animating => "animating",
        AnimationPhase::Settled => "settled",
    }
}

// ---------------------------------------------------------------------------
// Empty state and frame
// ---------------------------------------------------------------------------

/// Why there is nothing to preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EmptyReason {
    NoSelection,
    NoSlides,
}

impl EmptyReason {
    pub fn message(self) -> &'static str {
        match self {
            Self::NoSelection => "Select a slide to preview",
            Self::NoSlides => "This flow has no slides yet",
        }
    }
}

pub fn render_empty(reason: EmptyReason) -> ViewNode {
    Element::new("div")
        .class("flex h-full w-full items-center justify-center")
        .attr("data-empty", "true")
        .child(
            Element::new("p")
                .class("text-center text-muted-foreground")
                .text(reason.message()),
        )
        .into()
}

pub const REPLAY_LABEL: &str = "Replay Animation";

/// Place a rendered screen inside the device frame for `mode`.
pub fn phone_frame(screen: ViewNode, mode: PreviewMode) -> ViewNode {
    match mode {
        PreviewMode::Embedded => Element::new("div")
            .class("h-screen w-screen flex flex-col bg-white")
            .attr("data-mode", "embedded")
            .child(screen)
            .into(),
        PreviewMode::Editor | PreviewMode::Standalone => Element::new("div")
            .class("relative")
            .attr("data-mode", if mode == PreviewMode::Editor { "editor" } else { "standalone" })
            .child(
                Element::new("div")
                    .class("phone-frame w-[320px] h-[650px] bg-white flex flex-col")
                    .child(screen),
            )
            .child(
                Element::new("div").class("absolute bottom-4 right-4").child(
                    Element::new("button")
                        .attr("type", "button")
                        .attr("data-action", "replay")
                        .class("text-xs border rounded-md px-2 py-1 bg-white")
                        .text(REPLAY_LABEL),
                ),
            )
            .into(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
