//! User interactions with responsive slides and the events they produce.
//!
//! An [`Interaction`] is checked against the slide it targets, turned into a
//! [`ResponseEvent`], and handed to a [`ResponseSink`]. [`ResponseLog`] is
//! the collecting sink the preview uses; it also builds the payload the
//! native SDK receives.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::slide::{parse_iso_date, Slide, SlideType};
use crate::types::SlideId;

/// Something the user did on a slide that captures an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Interaction {
    SelectChoice(String),
    InputChanged(String),
    /// ISO `YYYY-MM-DD`.
    SelectDate(String),
}

impl Interaction {
    pub fn slide_type(&self) -> SlideType {
        match self {
            Self::SelectChoice(_) => SlideType::Choice,
            Self::InputChanged(_) => SlideType::Input,
            Self::SelectDate(_) => SlideType::Date,
        }
    }
}

/// One recorded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEvent {
    pub slide_id: SlideId,
    pub slide_type: SlideType,
    pub question: String,
    pub answer: String,
    pub sdk_key: String,
}

/// Receives response events as they happen.
pub trait ResponseSink {
    fn record(&mut self, event: ResponseEvent);
}

/// Validate `interaction` against `slide`, emit one event to `sink`, and
/// return it.
pub fn interact(
    slide: &Slide,
    interaction: &Interaction,
    sink: &mut dyn ResponseSink,
) -> Result<ResponseEvent, CoreError> {
    let expected = interaction.slide_type();
    if slide.slide_type != expected {
        return Err(CoreError::Validation(format!(
            "Slide '{}' is a {} slide and cannot take a {} response",
            slide.id,
            slide.slide_type.as_str(),
            expected.as_str()
        )));
    }

    let answer = match interaction {
        Interaction::SelectChoice(option) => {
            if !slide.display_options().iter().any(|o| o == option) {
                return Err(CoreError::Validation(format!(
                    "'{option}' is not an option of slide '{}'",
                    slide.id
                )));
            }
            option.clone()
        }
        Interaction::InputChanged(value) => value.clone(),
        Interaction::SelectDate(raw) => {
            let date = parse_iso_date(Some(raw.as_str())).ok_or_else(|| {
                CoreError::Validation(format!("'{raw}' is not a YYYY-MM-DD date"))
            })?;
            if !date_in_range(slide, date) {
                return Err(CoreError::Validation(format!(
                    "{date} is outside the allowed range for slide '{}'",
                    slide.id
                )));
            }
            date.format("%Y-%m-%d").to_string()
        }
    };

    let event = ResponseEvent {
        slide_id: slide.id.clone(),
        slide_type: slide.slide_type,
        question: slide.question().to_string(),
        answer,
        sdk_key: slide.sdk_key(),
    };
    sink.record(event.clone());
    Ok(event)
}

fn date_in_range(slide: &Slide, date: NaiveDate) -> bool {
    !slide.min_date().is_some_and(|min| date < min)
        && !slide.max_date().is_some_and(|max| date > max)
}

/// Whether `answer` is still acceptable for `slide` as currently edited.
///
/// Choices must be one of the displayed options and dates must parse and
/// sit inside `[minDate, maxDate]`. Free text is always kept.
pub fn answer_is_valid(slide: &Slide, answer: &str) -> bool {
    match slide.slide_type {
        SlideType::Choice => slide.display_options().iter().any(|o| o == answer),
        SlideType::Input => true,
        SlideType::Date => {
            parse_iso_date(Some(answer)).is_some_and(|date| date_in_range(slide, date))
        }
        SlideType::Text | SlideType::Image | SlideType::Video | SlideType::Unknown => false,
    }
}

fn still_valid(slides: &[Slide], slide_id: &str, answer: &str) -> bool {
    slides
        .iter()
        .find(|s| s.id == slide_id)
        .is_some_and(|s| answer_is_valid(s, answer))
}

// ---------------------------------------------------------------------------
// Collecting sink
// ---------------------------------------------------------------------------

/// Row of the preview-data summary: one per response-collecting slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSummary {
    pub slide_id: SlideId,
    pub slide_type: SlideType,
    pub question: String,
    pub sdk_key: String,
    pub answer: Option<String>,
}

/// The latest event per slide, in the order slides were last answered.
///
/// Input slides emit an event per keystroke; only the newest one is kept.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResponseLog {
    events: Vec<ResponseEvent>,
}

impl ResponseSink for ResponseLog {
    fn record(&mut self, event: ResponseEvent) {
        self.events.retain(|e| e.slide_id != event.slide_id);
        self.events.push(event);
    }
}

impl ResponseLog {
    pub fn events(&self) -> &[ResponseEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Latest answer recorded for `slide_id`.
    pub fn answer_for(&self, slide_id: &str) -> Option<&str> {
        self.events
            .iter()
            .rev()
            .find(|e| e.slide_id == slide_id)
            .map(|e| e.answer.as_str())
    }

    /// Latest answer per slide id.
    pub fn answers(&self) -> HashMap<&str, &str> {
        let mut answers = HashMap::new();
        for event in &self.events {
            answers.insert(event.slide_id.as_str(), event.answer.as_str());
        }
        answers
    }

    /// Answers lined up against the slides that can collect them.
    pub fn summary(&self, slides: &[Slide]) -> Vec<ResponseSummary> {
        slides
            .iter()
            .filter(|s| s.slide_type.collects_response())
            .map(|s| ResponseSummary {
                slide_id: s.id.clone(),
                slide_type: s.slide_type,
                question: s.question().to_string(),
                sdk_key: s.sdk_key(),
                answer: self.answer_for(&s.id).map(str::to_string),
            })
            .collect()
    }

    /// `{"app": {sdkKey: answer}}` with the latest answer per key.
    pub fn sdk_payload(&self) -> Value {
        let mut app = Map::new();
        for event in &self.events {
            app.insert(event.sdk_key.clone(), Value::String(event.answer.clone()));
        }
        let mut root = Map::new();
        root.insert("app".to_string(), Value::Object(app));
        Value::Object(root)
    }

    /// Forget answers for deleted slides and answers the slide's current
    /// options or date range no longer allow.
    pub fn retain_valid(&mut self, slides: &[Slide]) {
        self.events
            .retain(|e| still_valid(slides, &e.slide_id, &e.answer));
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

// ---------------------------------------------------------------------------
// Local selections
// ---------------------------------------------------------------------------

/// What each responsive slide currently shows as chosen or typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selections(HashMap<SlideId, String>);

impl Selections {
    pub fn get(&self, slide_id: &str) -> Option<&str> {
        self.0.get(slide_id).map(String::as_str)
    }

    pub fn set(&mut self, slide_id: impl Into<SlideId>, value: impl Into<String>) {
        self.0.insert(slide_id.into(), value.into());
    }

    pub fn remove(&mut self, slide_id: &str) -> Option<String> {
        self.0.remove(slide_id)
    }

    pub fn retain_valid(&mut self, slides: &[Slide]) {
        self.0.retain(|id, value| still_valid(slides, id, value));
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn choice_slide() -> Slide {
        let mut slide = Slide::with_type_defaults("slide-42", SlideType::Choice);
        slide.title = Some("How often do you train?".into());
        slide.options = Some(vec!["1-2".into(), "3-4".into(), "5+".into()]);
        slide
    }

    fn date_slide() -> Slide {
        let mut slide = Slide::with_type_defaults("slide-7", SlideType::Date);
        slide.min_date = Some("2025-01-01".into());
        slide.max_date = Some("2025-12-31".into());
        slide
    }

    #[test]
    fn choice_emits_one_event_with_sdk_key() {
        let mut log = ResponseLog::default();
        let event = interact(
            &choice_slide(),
            &Interaction::SelectChoice("3-4".into()),
            &mut log,
        )
        .unwrap();

        assert_eq!(event.sdk_key, "key_42");
        assert_eq!(event.answer, "3-4");
        assert_eq!(event.question, "How often do you train?");
        assert_eq!(log.events().len(), 1);
    }

    #[test]
    fn input_and_date_use_same_key_scheme() {
        let mut log = ResponseLog::default();
        let mut input = Slide::with_type_defaults("slide-9", SlideType::Input);
        input.title = None;

        let event = interact(&input, &Interaction::InputChanged("John".into()), &mut log).unwrap();
        assert_eq!(event.sdk_key, "key_9");
        assert_eq!(event.question, "Untitled Question");

        let event = interact(
            &date_slide(),
            &Interaction::SelectDate("2025-04-16".into()),
            &mut log,
        )
        .unwrap();
        assert_eq!(event.sdk_key, "key_7");
        assert_eq!(event.answer, "2025-04-16");
        assert_eq!(log.events().len(), 2);
    }

    #[test]
    fn rejects_mismatched_or_invalid_interactions() {
        let mut log = ResponseLog::default();
        assert_matches!(
            interact(&choice_slide(), &Interaction::InputChanged("x".into()), &mut log),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            interact(&choice_slide(), &Interaction::SelectChoice("Never".into()), &mut log),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            interact(&date_slide(), &Interaction::SelectDate("2026-01-01".into()), &mut log),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            interact(&date_slide(), &Interaction::SelectDate("soon".into()), &mut log),
            Err(CoreError::Validation(_))
        );
        assert!(log.is_empty());
    }

    #[test]
    fn placeholder_options_are_selectable() {
        let mut slide = choice_slide();
        slide.options = None;
        let mut log = ResponseLog::default();
        assert!(interact(&slide, &Interaction::SelectChoice("Option 2".into()), &mut log).is_ok());
    }

    #[test]
    fn payload_and_summary_use_latest_answer() {
        let slide = choice_slide();
        let text = Slide::bare("slide-1", SlideType::Text);
        let mut log = ResponseLog::default();
        interact(&slide, &Interaction::SelectChoice("1-2".into()), &mut log).unwrap();
        interact(&slide, &Interaction::SelectChoice("5+".into()), &mut log).unwrap();

        assert_eq!(log.sdk_payload(), json!({ "app": { "key_42": "5+" } }));

        let summary = log.summary(&[text, slide]);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].answer.as_deref(), Some("5+"));
    }

    #[test]
    fn keystrokes_keep_one_event_per_slide() {
        let input = Slide::with_type_defaults("slide-9", SlideType::Input);
        let mut log = ResponseLog::default();
        for typed in ["J", "Jo", "Joh", "John"] {
            interact(&input, &Interaction::InputChanged(typed.into()), &mut log).unwrap();
        }
        interact(&choice_slide(), &Interaction::SelectChoice("5+".into()), &mut log).unwrap();
        interact(&input, &Interaction::InputChanged("Johnny".into()), &mut log).unwrap();

        let answers: Vec<_> = log.events().iter().map(|e| e.answer.as_str()).collect();
        assert_eq!(answers, ["5+", "Johnny"]);
    }

    #[test]
    fn answers_invalidated_by_edits_are_dropped() {
        let mut choice = choice_slide();
        let dates = date_slide();
        let mut log = ResponseLog::default();
        let mut selections = Selections::default();
        interact(&choice, &Interaction::SelectChoice("3-4".into()), &mut log).unwrap();
        interact(&dates, &Interaction::SelectDate("2025-06-01".into()), &mut log).unwrap();
        selections.set("slide-42", "3-4");
        selections.set("slide-7", "2025-06-01");

        choice.options = Some(vec!["Yes".into(), "No".into()]);
        let mut narrowed = dates.clone();
        narrowed.max_date = Some("2025-03-31".into());
        let slides = [choice, narrowed];

        log.retain_valid(&slides);
        selections.retain_valid(&slides);
        assert!(log.is_empty());
        assert_eq!(selections.get("slide-42"), None);
        assert_eq!(selections.get("slide-7"), None);
    }

    #[test]
    fn answers_survive_unrelated_edits() {
        let mut choice = choice_slide();
        let mut log = ResponseLog::default();
        interact(&choice, &Interaction::SelectChoice("1-2".into()), &mut log).unwrap();

        choice.title = Some("Weekly sessions?".into());
        log.retain_valid(std::slice::from_ref(&choice));
        assert_eq!(log.answer_for("slide-42"), Some("1-2"));
    }

    #[test]
    fn interaction_wire_shape() {
        let parsed: Interaction =
            serde_json::from_value(json!({ "kind": "selectChoice", "value": "3-4" })).unwrap();
        assert_eq!(parsed, Interaction::SelectChoice("3-4".into()));
    }
}
