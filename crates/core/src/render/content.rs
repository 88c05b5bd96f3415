//! Type-specific slide content.
//!
//! Missing media or options are soft failures: they render placeholders.

use chrono::NaiveDate;

use crate::slide::{non_empty as non_blank, parse_iso_date, SlideType};

use super::chrome::Icon;
use super::classes;
use super::view::Element;
use super::{AnswerForm, RenderContext, ANSWER_FIELD};

pub const NO_IMAGE_TEXT: &str = "No image selected";
pub const NO_VIDEO_TEXT: &str = "No video selected";
pub const UNKNOWN_TYPE_TEXT: &str = "Unknown slide type";
pub const DEFAULT_INPUT_PLACEHOLDER: &str = "Enter your response";
pub const DEFAULT_DATE_PLACEHOLDER: &str = "Select a date...";
pub const REQUIRED_TEXT: &str = "This field is required";

/// Display format for chosen dates, e.g. "April 16, 2025".
pub const DATE_DISPLAY_FORMAT: &str = "%B %-d, %Y";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}

/// Content that follows the title and description. `None` for plain text
/// slides.
pub fn type_content(ctx: &RenderContext<'_>) -> Option<Element> {
    let content = match ctx.slide.slide_type {
        SlideType::Text => return None,
        SlideType::Image => image(ctx),
        SlideType::Video => video(ctx),
        SlideType::Choice => choice(ctx),
        SlideType::Input => input(ctx),
        SlideType::Date => date(ctx),
        SlideType::Unknown => unknown(),
    };
    match &ctx.links.answer {
        Some(form) if ctx.slide.slide_type.collects_response() => {
            Some(answer_form(form, content))
        }
        _ => Some(content),
    }
}

fn answer_form(form: &AnswerForm, content: Element) -> Element {
    let hidden = form.fields.iter().map(|(name, value)| {
        Element::new("input")
            .attr("type", "hidden")
            .attr("name", name.as_str())
            .attr("value", value.as_str())
    });
    Element::new("form")
        .class("w-full")
        .attr("method", "get")
        .attr("action", form.action.as_str())
        .children(hidden)
        .child(content)
}

fn media_placeholder(icon: Icon, label: &str, rounded: bool) -> Element {
    Element::new("div")
        .class("w-full aspect-video bg-gray-100 flex flex-col items-center justify-center")
        .class(classes::rounded(rounded))
        .attr("data-placeholder", icon.name())
        .child(icon.view("h-12 w-12 text-gray-400"))
        .child(Element::new("p").class("text-gray-500 mt-2").text(label))
}

fn image(ctx: &RenderContext<'_>) -> Element {
    let slide = ctx.slide;
    let rounded = ctx.resolved.rounded_corners;
    let body = match non_blank(slide.image_url.as_deref()) {
        Some(url) => Element::new("img")
            .class("max-w-full mx-auto object-contain")
            .class(classes::rounded(rounded))
            .attr("src", url)
            .attr("alt", non_blank(slide.title.as_deref()).unwrap_or("Slide image")),
        None => media_placeholder(Icon::Image, NO_IMAGE_TEXT, rounded),
    };
    Element::new("div")
        .class("mb-6 w-full flex justify-center")
        .child(body)
}

fn video(ctx: &RenderContext<'_>) -> Element {
    let rounded = ctx.resolved.rounded_corners;
    let body = match non_blank(ctx.slide.video_url.as_deref()) {
        Some(url) => Element::new("video")
            .class("max-w-full mx-auto")
            .attr("src", url)
            .flag("controls"),
        None => media_placeholder(Icon::Video, NO_VIDEO_TEXT, false),
    };
    Element::new("div")
        .class("mb-6 w-full")
        .class_if(rounded, "rounded-lg overflow-hidden")
        .child(body)
}

fn choice(ctx: &RenderContext<'_>) -> Element {
    let style = ctx.resolved;
    let selected = ctx.selections.get(&ctx.slide.id);
    let submits = ctx.links.answer.is_some();

    let buttons = ctx.slide.display_options().into_iter().map(|option| {
        let is_selected = selected == Some(option.as_str());
        let border = if is_selected {
            style.button_text_color.clone()
        } else {
            style.button_color.clone()
        };
        let button = if submits {
            Element::new("button")
                .attr("type", "submit")
                .attr("name", ANSWER_FIELD)
                .attr("value", option.clone())
        } else {
            Element::new("button").attr("type", "button")
        };
        button
            .attr("data-option", option.clone())
            .attr("aria-pressed", is_selected.to_string())
            .class("py-2 px-4 border w-full text-left relative transition-colors")
            .class(classes::rounded(style.rounded_corners))
            .class_if(is_selected, "border-2 bg-black/5")
            .style("background-color", style.button_color.clone())
            .style("color", style.button_text_color.clone())
            .style("border-color", border)
            .child(
                Element::new("div")
                    .class("flex items-center justify-between")
                    .child(Element::new("span").text(option))
                    .child_opt(is_selected.then(|| Icon::Check.view("h-4 w-4"))),
            )
    });

    let summary = selected.map(|choice| {
        Element::new("div")
            .class("mt-4 p-3 bg-muted rounded-md text-sm")
            .child(
                Element::new("p")
                    .class("font-medium")
                    .text(format!("Selected: {choice}")),
            )
    });

    Element::new("div")
        .class("flex flex-col gap-2 mb-6 w-full")
        .children(buttons)
        .child_opt(summary)
}

fn input(ctx: &RenderContext<'_>) -> Element {
    let slide = ctx.slide;
    let field = Element::new("input")
        .attr("type", slide.input_type.unwrap_or_default().as_str())
        .attr(
            "placeholder",
            non_blank(slide.input_placeholder.as_deref()).unwrap_or(DEFAULT_INPUT_PLACEHOLDER),
        )
        .attr("name", ANSWER_FIELD)
        .attr("data-slide-input", slide.id.clone())
        .class("w-full p-2 border")
        .class(classes::rounded(ctx.resolved.rounded_corners));
    let field = match ctx.selections.get(&slide.id) {
        Some(value) => field.attr("value", value),
        None => field,
    };
    Element::new("div").class("mb-6 w-full").child(field)
}

fn date(ctx: &RenderContext<'_>) -> Element {
    let slide = ctx.slide;
    let chosen = parse_iso_date(ctx.selections.get(&slide.id)).or_else(|| slide.default_date());

    let label = match chosen {
        Some(d) => Element::new("span").text(format_date(d)),
        None => Element::new("span").class("text-muted-foreground").text(
            non_blank(slide.date_placeholder.as_deref()).unwrap_or(DEFAULT_DATE_PLACEHOLDER),
        ),
    };

    let mut picker = Element::new("input")
        .attr("type", "date")
        .attr("name", ANSWER_FIELD)
        .attr("data-slide-date", slide.id.clone())
        .class("absolute inset-0 opacity-0 cursor-pointer");
    if let Some(min) = slide.min_date() {
        picker = picker.attr("min", min.format("%Y-%m-%d").to_string());
    }
    if let Some(max) = slide.max_date() {
        picker = picker.attr("max", max.format("%Y-%m-%d").to_string());
    }
    if let Some(d) = chosen {
        picker = picker.attr("value", d.format("%Y-%m-%d").to_string());
    }

    let trigger = Element::new("div")
        .class("relative w-full flex items-center border p-2 cursor-pointer transition-colors")
        .class(classes::rounded(ctx.resolved.rounded_corners))
        .child(Icon::Calendar.view("mr-2 h-4 w-4 opacity-70"))
        .child(label)
        .child(picker);

    let required = (slide.is_date_required() && chosen.is_none()).then(|| {
        Element::new("p")
            .class("text-xs text-red-500 mt-1")
            .text(REQUIRED_TEXT)
    });

    Element::new("div")
        .class("mb-6 w-full")
        .child(trigger)
        .child_opt(required)
}

fn unknown() -> Element {
    Element::new("div")
        .class("flex flex-col items-center justify-center")
        .attr("data-placeholder", "unknown")
        .child(
            Element::new("p")
                .class("text-muted-foreground")
                .text(UNKNOWN_TYPE_TEXT),
        )
}
