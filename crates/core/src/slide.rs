//! Slide and flow document model.
//!
//! A [`Slide`] is one onboarding screen: its type, optional content fields,
//! layout, and a flattened set of [`StyleOverrides`]. An [`OnboardingFlow`]
//! is the ordered list of slides plus one [`GlobalStyles`] record. The JSON
//! form uses camelCase keys so documents round-trip with the web preview
//! and the native SDK unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::style::{GlobalStyles, StyleOverrides};
use crate::types::{SlideId, SLIDE_ID_PREFIX};

// ---------------------------------------------------------------------------
// Slide type
// ---------------------------------------------------------------------------

/// The kind of content a slide presents.
///
/// Any type string this build does not know deserializes to
/// [`SlideType::Unknown`]; the renderer shows a placeholder for it instead
/// of rejecting the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideType {
    Text,
    Image,
    Video,
    Choice,
    Input,
    Date,
    #[serde(other)]
    Unknown,
}

impl SlideType {
    /// Every slide type the editor can create, in picker order.
    pub const CREATABLE: [SlideType; 6] = [
        Self::Choice,
        Self::Text,
        Self::Image,
        Self::Video,
        Self::Input,
        Self::Date,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Choice => "choice",
            Self::Input => "input",
            Self::Date => "date",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable label shown in the slide list and type picker.
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Choice => "Choice",
            Self::Input => "Input",
            Self::Date => "Date",
            Self::Unknown => "Unknown",
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }

    /// Whether slides of this type capture a user response.
    pub fn collects_response(self) -> bool {
        matches!(self, Self::Choice | Self::Input | Self::Date)
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    Top,
    #[default]
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// HTML input type used by `input` slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Email,
    Number,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number => "number",
        }
    }
}

// ---------------------------------------------------------------------------
// Slide
// ---------------------------------------------------------------------------

/// Options shown by a `choice` slide that has none configured.
pub const PLACEHOLDER_OPTIONS: [&str; 2] = ["Option 1", "Option 2"];

/// One onboarding screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: SlideId,
    #[serde(rename = "type")]
    pub slide_type: SlideType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_date: Option<String>,

    #[serde(default)]
    pub vertical_alignment: VerticalAlignment,
    #[serde(default)]
    pub horizontal_alignment: HorizontalAlignment,

    /// Per-slide style overrides; absent fields inherit from the flow.
    #[serde(flatten)]
    pub style: StyleOverrides,
}

impl Slide {
    /// A bare slide with centered layout and no content.
    pub fn bare(id: impl Into<SlideId>, slide_type: SlideType) -> Self {
        Self {
            id: id.into(),
            slide_type,
            title: None,
            description: None,
            image_url: None,
            video_url: None,
            options: None,
            input_placeholder: None,
            input_type: None,
            date_placeholder: None,
            default_date: None,
            date_required: None,
            min_date: None,
            max_date: None,
            vertical_alignment: VerticalAlignment::Center,
            horizontal_alignment: HorizontalAlignment::Center,
            style: StyleOverrides::default(),
        }
    }

    /// A new slide carrying the content defaults the editor applies when a
    /// slide of `slide_type` is added.
    pub fn with_type_defaults(id: impl Into<SlideId>, slide_type: SlideType) -> Self {
        let mut slide = Self::bare(id, slide_type);
        match slide_type {
            SlideType::Date => {
                slide.title = Some("Select a Date".into());
                slide.description = Some("Please choose a date to continue".into());
                slide.date_placeholder = Some("Select a date...".into());
                slide.default_date = Some(String::new());
                slide.date_required = Some(false);
                slide.min_date = Some(String::new());
                slide.max_date = Some(String::new());
            }
            SlideType::Choice => {
                slide.title = Some("Make a Selection".into());
                slide.description = Some("Please choose one of the following options".into());
                slide.options = Some(PLACEHOLDER_OPTIONS.iter().map(|o| o.to_string()).collect());
            }
            _ => {}
        }
        slide
    }

    /// The options a `choice` slide presents, falling back to two
    /// placeholders when none are configured.
    pub fn display_options(&self) -> Vec<String> {
        match &self.options {
            Some(options) if !options.is_empty() => options.clone(),
            _ => PLACEHOLDER_OPTIONS.iter().map(|o| o.to_string()).collect(),
        }
    }

    /// The question text reported alongside a response.
    pub fn question(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or("Untitled Question")
    }

    /// Stable key under which this slide's answer is reported to the SDK.
    pub fn sdk_key(&self) -> String {
        let suffix = self.id.strip_prefix(SLIDE_ID_PREFIX).unwrap_or(&self.id);
        format!("key_{suffix}")
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        parse_iso_date(self.min_date.as_deref())
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        parse_iso_date(self.max_date.as_deref())
    }

    pub fn default_date(&self) -> Option<NaiveDate> {
        parse_iso_date(self.default_date.as_deref())
    }

    pub fn is_date_required(&self) -> bool {
        self.date_required.unwrap_or(false)
    }
}

/// Treat empty strings the same as absent values.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse an ISO `YYYY-MM-DD` date, accepting a trailing time component.
pub fn parse_iso_date(value: Option<&str>) -> Option<NaiveDate> {
    let raw = non_empty(value)?.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

// ---------------------------------------------------------------------------
// Flow
// ---------------------------------------------------------------------------

/// The top-level onboarding document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingFlow {
    pub id: String,
    pub name: String,
    pub slides: Vec<Slide>,
    #[serde(default)]
    pub global_styles: GlobalStyles,
}

/// Name given to a freshly created flow.
pub const DEFAULT_FLOW_NAME: &str = "My Onboarding Flow";

impl Default for OnboardingFlow {
    fn default() -> Self {
        let mut welcome = Slide::bare("slide-1", SlideType::Text);
        welcome.title = Some("Welcome to the App".into());
        welcome.description = Some("This is the first step in your onboarding journey".into());

        Self {
            id: "flow-1".into(),
            name: DEFAULT_FLOW_NAME.into(),
            slides: vec![welcome],
            global_styles: GlobalStyles::default(),
        }
    }
}

impl OnboardingFlow {
    pub fn position(&self, id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id == id)
    }

    pub fn slide(&self, id: &str) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
