use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw quiz answers keyed by question number (1 to 6)
pub type QuizAnswers = BTreeMap<u8, AnswerValue>;

/// A single quiz answer: one option, or several (the colour question)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Many(Vec<String>),
}

impl AnswerValue {
    /// The answer as a single option; a list contributes its first entry.
    /// Empty strings count as unanswered.
    pub fn as_single(&self) -> Option<&str> {
        let value = match self {
            AnswerValue::Single(s) => s.as_str(),
            AnswerValue::Many(values) => values.first()?.as_str(),
        };
        (!value.is_empty()).then_some(value)
    }

    /// The answer as a list of options; an empty single answer is unanswered
    pub fn as_list(&self) -> Option<Vec<String>> {
        match self {
            AnswerValue::Single(s) if s.is_empty() => None,
            AnswerValue::Single(s) => Some(vec![s.clone()]),
            AnswerValue::Many(values) => Some(values.clone()),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Single(value.to_string())
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(values: Vec<&str>) -> Self {
        AnswerValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// Structured taste descriptor derived from the quiz
///
/// Field names on the wire follow the storefront's user records. Scalars are
/// optional and collections default to empty so that partial profiles coming
/// from the store still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TasteProfile {
    pub visual_style: Option<String>,
    pub movie: Option<String>,
    pub colors: Vec<String>,
    pub time_of_day: Option<String>,
    pub primary_genre: Option<String>,
    pub aesthetic: Option<String>,
    /// One component per answered value, each in `[0, 1)`
    pub vector: Vec<f64>,
    pub genre: Vec<String>,
    pub mood: Vec<String>,
    pub era: Option<String>,
    #[serde(rename = "listening_context")]
    pub listening_context: Option<String>,
    #[serde(rename = "lyrics_importance")]
    pub lyrics_importance: u8,
    #[serde(rename = "instrumental_complexity")]
    pub instrumental_complexity: u8,
}

impl TasteProfile {
    pub fn visual_style(&self) -> Option<&str> {
        self.visual_style.as_deref()
    }

    pub fn movie(&self) -> Option<&str> {
        self.movie.as_deref()
    }

    pub fn likes_genre(&self, category: &str) -> bool {
        self.genre.iter().any(|g| g == category)
    }

    pub fn has_mood(&self, mood: &str) -> bool {
        self.mood.iter().any(|m| m == mood)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_value_untagged() {
        let answers: QuizAnswers =
            serde_json::from_str(r#"{"1": "gothic", "3": ["red", "black"]}"#).unwrap();
        assert_eq!(answers[&1].as_single(), Some("gothic"));
        assert_eq!(answers[&3].as_list(), Some(vec!["red".to_string(), "black".to_string()]));
    }

    #[test]
    fn test_empty_answer_is_unanswered() {
        assert_eq!(AnswerValue::from("").as_single(), None);
        assert_eq!(AnswerValue::Many(vec![]).as_single(), None);
        assert_eq!(AnswerValue::from("").as_list(), None);
    }

    #[test]
    fn test_profile_wire_names() {
        let profile = TasteProfile {
            visual_style: Some("cyberpunk".to_string()),
            lyrics_importance: 7,
            ..Default::default()
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["visualStyle"], "cyberpunk");
        assert_eq!(json["lyrics_importance"], 7);
        assert!(json.get("timeOfDay").is_some());
    }

    #[test]
    fn test_partial_profile_loads() {
        let profile: TasteProfile = serde_json::from_str(r#"{"genre": ["rock"]}"#).unwrap();
        assert!(profile.likes_genre("rock"));
        assert!(profile.mood.is_empty());
        assert!(profile.movie().is_none());
    }
}
