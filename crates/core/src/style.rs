//! Style vocabulary shared by slide overrides and flow-wide defaults.
//!
//! [`StyleOverrides`] is a record of optional style fields. Slides carry one
//! (flattened into the slide JSON) and [`GlobalStyles`] wraps one for the
//! whole flow. Field-level edits go through [`StyleField`] so that only the
//! enumerated set of fields can be patched, each with its own typed value.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Enumerated style values
// ---------------------------------------------------------------------------

/// Relative text size for titles and descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Where the continue button sits inside the phone frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonPosition {
    #[default]
    Bottom,
    BelowContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonIcon {
    #[default]
    ArrowRight,
    ChevronRight,
    ChevronDown,
    None,
}

impl ButtonIcon {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ArrowRight => "arrow-right",
            Self::ChevronRight => "chevron-right",
            Self::ChevronDown => "chevron-down",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBarHeight {
    #[default]
    Thin,
    Medium,
    Thick,
}

/// Entrance animation applied to slide content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Animation {
    #[default]
    None,
    Fade,
    SlideUp,
    SlideLeft,
    Zoom,
}

impl Animation {
    /// CSS class that plays this animation, empty for [`Animation::None`].
    pub fn css_class(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Fade => "animate-fade-in",
            Self::SlideUp => "animate-slide-up",
            Self::SlideLeft => "animate-slide-from-right",
            Self::Zoom => "animate-scale-in",
        }
    }
}

// ---------------------------------------------------------------------------
// Style overrides
// ---------------------------------------------------------------------------

/// Optional style fields. `None` means "inherit".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_gradient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_font_size: Option<FontSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_font_size: Option<FontSize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_position: Option<ButtonPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_icon: Option<ButtonIcon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_size: Option<ButtonSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_full_width: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounded_corners: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_bar_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_bar_height: Option<ProgressBarHeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_progress_bar: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
}

/// Every patchable style field, named as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleField {
    BackgroundColor,
    BackgroundGradient,
    BackgroundImage,
    TitleColor,
    DescriptionColor,
    TitleFontSize,
    DescriptionFontSize,
    ButtonColor,
    ButtonTextColor,
    ButtonPosition,
    ButtonIcon,
    ButtonSize,
    ButtonFullWidth,
    RoundedCorners,
    ProgressBarColor,
    ProgressBarHeight,
    ProgressPercentage,
    ShowProgressBar,
    Animation,
}

impl StyleField {
    pub const ALL: [StyleField; 19] = [
        Self::BackgroundColor,
        Self::BackgroundGradient,
        Self::BackgroundImage,
        Self::TitleColor,
        Self::DescriptionColor,
        Self::TitleFontSize,
        Self::DescriptionFontSize,
        Self::ButtonColor,
        Self::ButtonTextColor,
        Self::ButtonPosition,
        Self::ButtonIcon,
        Self::ButtonSize,
        Self::ButtonFullWidth,
        Self::RoundedCorners,
        Self::ProgressBarColor,
        Self::ProgressBarHeight,
        Self::ProgressPercentage,
        Self::ShowProgressBar,
        Self::Animation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::BackgroundColor => "backgroundColor",
            Self::BackgroundGradient => "backgroundGradient",
            Self::BackgroundImage => "backgroundImage",
            Self::TitleColor => "titleColor",
            Self::DescriptionColor => "descriptionColor",
            Self::TitleFontSize => "titleFontSize",
            Self::DescriptionFontSize => "descriptionFontSize",
            Self::ButtonColor => "buttonColor",
            Self::ButtonTextColor => "buttonTextColor",
            Self::ButtonPosition => "buttonPosition",
            Self::ButtonIcon => "buttonIcon",
            Self::ButtonSize => "buttonSize",
            Self::ButtonFullWidth => "buttonFullWidth",
            Self::RoundedCorners => "roundedCorners",
            Self::ProgressBarColor => "progressBarColor",
            Self::ProgressBarHeight => "progressBarHeight",
            Self::ProgressPercentage => "progressPercentage",
            Self::ShowProgressBar => "showProgressBar",
            Self::Animation => "animation",
        }
    }
}

impl fmt::Display for StyleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StyleField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown style field '{s}'")))
    }
}

impl StyleOverrides {
    /// Set or clear a single field from a JSON value.
    ///
    /// `null` clears the override. Any other value must deserialize into the
    /// field's type.
    pub fn apply_patch(
        &mut self,
        field: StyleField,
        value: &serde_json::Value,
    ) -> Result<(), CoreError> {
        match field {
            StyleField::BackgroundColor => set_field(&mut self.background_color, field, value),
            StyleField::BackgroundGradient => {
                set_field(&mut self.background_gradient, field, value)
            }
            StyleField::BackgroundImage => set_field(&mut self.background_image, field, value),
            StyleField::TitleColor => set_field(&mut self.title_color, field, value),
            StyleField::DescriptionColor => set_field(&mut self.description_color, field, value),
            StyleField::TitleFontSize => set_field(&mut self.title_font_size, field, value),
            StyleField::DescriptionFontSize => {
                set_field(&mut self.description_font_size, field, value)
            }
            StyleField::ButtonColor => set_field(&mut self.button_color, field, value),
            StyleField::ButtonTextColor => set_field(&mut self.button_text_color, field, value),
            StyleField::ButtonPosition => set_field(&mut self.button_position, field, value),
            StyleField::ButtonIcon => set_field(&mut self.button_icon, field, value),
            StyleField::ButtonSize => set_field(&mut self.button_size, field, value),
            StyleField::ButtonFullWidth => set_field(&mut self.button_full_width, field, value),
            StyleField::RoundedCorners => set_field(&mut self.rounded_corners, field, value),
            StyleField::ProgressBarColor => set_field(&mut self.progress_bar_color, field, value),
            StyleField::ProgressBarHeight => {
                set_field(&mut self.progress_bar_height, field, value)
            }
            StyleField::ProgressPercentage => {
                set_field(&mut self.progress_percentage, field, value)
            }
            StyleField::ShowProgressBar => set_field(&mut self.show_progress_bar, field, value),
            StyleField::Animation => set_field(&mut self.animation, field, value),
        }
    }

    /// Apply a `{ fieldName: value, ... }` object.
    ///
    /// All-or-nothing: if any key is unknown or any value is ill-typed the
    /// record is left untouched.
    pub fn apply_patch_map(
        &mut self,
        patch: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), CoreError> {
        let mut next = self.clone();
        for (key, value) in patch {
            let field: StyleField = key.parse()?;
            next.apply_patch(field, value)?;
        }
        *self = next;
        Ok(())
    }
}

fn set_field<T: DeserializeOwned>(
    slot: &mut Option<T>,
    field: StyleField,
    value: &serde_json::Value,
) -> Result<(), CoreError> {
    if value.is_null() {
        *slot = None;
        return Ok(());
    }
    let parsed = T::deserialize(value)
        .map_err(|e| CoreError::Validation(format!("Invalid value for '{field}': {e}")))?;
    *slot = Some(parsed);
    Ok(())
}

// ---------------------------------------------------------------------------
// Global styles
// ---------------------------------------------------------------------------

pub const DEFAULT_ACCENT_COLOR: &str = "#4299e1";
pub const DEFAULT_BUTTON_TEXT_COLOR: &str = "#ffffff";

/// Flow-wide style defaults.
///
/// Serialized as a plain style record. A new flow starts from
/// [`GlobalStyles::default`]; any field may later be cleared, in which case
/// the resolver falls back to its own hardcoded default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalStyles {
    pub styles: StyleOverrides,
}

impl Default for GlobalStyles {
    fn default() -> Self {
        Self {
            styles: StyleOverrides {
                button_color: Some(DEFAULT_ACCENT_COLOR.into()),
                button_text_color: Some(DEFAULT_BUTTON_TEXT_COLOR.into()),
                button_position: Some(ButtonPosition::Bottom),
                button_size: Some(ButtonSize::Medium),
                button_icon: Some(ButtonIcon::ArrowRight),
                show_progress_bar: Some(true),
                progress_bar_color: Some(DEFAULT_ACCENT_COLOR.into()),
                progress_bar_height: Some(ProgressBarHeight::Thin),
                animation: Some(Animation::Fade),
                title_font_size: Some(FontSize::Medium),
                description_font_size: Some(FontSize::Medium),
                ..StyleOverrides::default()
            },
        }
    }
}

impl GlobalStyles {
    pub fn new(styles: StyleOverrides) -> Self {
        Self { styles }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn every_field_name_parses_back() {
        for field in StyleField::ALL {
            assert_eq!(field.name().parse::<StyleField>().unwrap(), field);
        }
    }

    #[test]
    fn unknown_field_name_is_rejected() {
        assert_matches!("fontFamily".parse::<StyleField>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn patch_sets_typed_value() {
        let mut styles = StyleOverrides::default();
        styles
            .apply_patch(StyleField::ButtonPosition, &json!("below-content"))
            .unwrap();
        assert_eq!(styles.button_position, Some(ButtonPosition::BelowContent));

        styles
            .apply_patch(StyleField::ProgressPercentage, &json!(45))
            .unwrap();
        assert_eq!(styles.progress_percentage, Some(45.0));
    }

    #[test]
    fn patch_null_clears_override() {
        let mut styles = StyleOverrides {
            title_color: Some("#111111".into()),
            ..Default::default()
        };
        styles.apply_patch(StyleField::TitleColor, &json!(null)).unwrap();
        assert_eq!(styles.title_color, None);
    }

    #[test]
    fn patch_rejects_ill_typed_value() {
        let mut styles = StyleOverrides::default();
        assert_matches!(
            styles.apply_patch(StyleField::ButtonSize, &json!("huge")),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            styles.apply_patch(StyleField::RoundedCorners, &json!("yes")),
            Err(CoreError::Validation(_))
        );
        assert_eq!(styles, StyleOverrides::default());
    }

    #[test]
    fn patch_map_is_all_or_nothing() {
        let mut styles = StyleOverrides::default();
        let patch = json!({ "titleColor": "#222222", "bogus": 1 });
        let result = styles.apply_patch_map(patch.as_object().unwrap());
        assert!(result.is_err());
        assert_eq!(styles.title_color, None);

        let patch = json!({ "titleColor": "#222222", "animation": "zoom" });
        styles.apply_patch_map(patch.as_object().unwrap()).unwrap();
        assert_eq!(styles.title_color.as_deref(), Some("#222222"));
        assert_eq!(styles.animation, Some(Animation::Zoom));
    }

    #[test]
    fn global_defaults_use_thin_progress_bar() {
        let globals = GlobalStyles::default();
        assert_eq!(globals.styles.progress_bar_height, Some(ProgressBarHeight::Thin));
        assert_eq!(globals.styles.animation, Some(Animation::Fade));
        assert_eq!(globals.styles.show_progress_bar, Some(true));
    }

    #[test]
    fn global_styles_serialize_flat() {
        let json = serde_json::to_value(GlobalStyles::default()).unwrap();
        assert_eq!(json["buttonColor"], DEFAULT_ACCENT_COLOR);
        assert_eq!(json["buttonIcon"], "arrow-right");
        assert!(json.get("styles").is_none());
    }

    #[test]
    fn animation_classes() {
        assert_eq!(Animation::SlideLeft.css_class(), "animate-slide-from-right");
        assert_eq!(Animation::None.css_class(), "");
    }
}
