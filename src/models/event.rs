//! Event model

use std::fmt;
use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

/// Kind of answer an RSVP question expects.
///
/// Stored as its integer discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum QuestionType {
    YesNo = 0,
    Mcq = 1,
    MultiSelect = 2,
    ShortAnswer = 3,
}

impl QuestionType {
    /// Map the organiser's `1`..`4` menu choice to a question type
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(QuestionType::YesNo),
            "2" => Some(QuestionType::Mcq),
            "3" => Some(QuestionType::MultiSelect),
            "4" => Some(QuestionType::ShortAnswer),
            _ => None,
        }
    }

    /// Whether the organiser has to enter the options by hand
    pub fn needs_options(&self) -> bool {
        matches!(self, QuestionType::Mcq | QuestionType::MultiSelect)
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::YesNo => "Yes/No",
            QuestionType::Mcq => "Multiple Choice",
            QuestionType::MultiSelect => "Multi-Select",
            QuestionType::ShortAnswer => "Short Answer",
        }
    }
}

impl From<QuestionType> for u8 {
    fn from(kind: QuestionType) -> Self {
        kind as u8
    }
}

impl TryFrom<u8> for QuestionType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(QuestionType::YesNo),
            1 => Ok(QuestionType::Mcq),
            2 => Ok(QuestionType::MultiSelect),
            3 => Ok(QuestionType::ShortAnswer),
            other => Err(format!("unknown question type: {}", other)),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One question/answer pair of the event details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QnA {
    pub question: String,
    pub answer: String,
    #[serde(rename = "imageFileID", default, skip_serializing_if = "Option::is_none")]
    pub image_file_id: Option<String>,
    #[serde(rename = "imageFileURL", default, skip_serializing_if = "Option::is_none")]
    pub image_file_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsvpQuestion {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(rename = "imageFileID", default, skip_serializing_if = "Option::is_none")]
    pub image_file_id: Option<String>,
    #[serde(rename = "imageFileURL", default, skip_serializing_if = "Option::is_none")]
    pub image_file_url: Option<String>,
}

impl RsvpQuestion {
    /// Start a question whose type is not chosen yet
    pub fn new(id: String, question: String) -> Self {
        Self {
            id,
            question,
            question_type: QuestionType::ShortAnswer,
            options: Vec::new(),
            image_file_id: None,
            image_file_url: None,
        }
    }

    /// Set the type and the options it implies.
    ///
    /// Yes/No questions always offer exactly `Yes` and `No`, short answers
    /// offer nothing, and choice questions wait for their options.
    pub fn set_type(&mut self, question_type: QuestionType) {
        self.question_type = question_type;
        self.options = match question_type {
            QuestionType::YesNo => vec!["Yes".to_string(), "No".to_string()],
            _ => Vec::new(),
        };
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "userid")]
    pub user_id: i64,
    pub name: String,
    #[serde(rename = "edmFileID", default, skip_serializing_if = "Option::is_none")]
    pub edm_file_id: Option<String>,
    #[serde(rename = "edmFileURL", default, skip_serializing_if = "Option::is_none")]
    pub edm_file_url: Option<String>,
    #[serde(rename = "eventDate")]
    pub event_date: NaiveDate,
    #[serde(rename = "eventDetails", default)]
    pub event_details: Vec<QnA>,
    #[serde(rename = "rsvpQuestions", default)]
    pub rsvp_questions: Vec<RsvpQuestion>,
    /// Participant document ids, without duplicates
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(rename = "checkInCode", default, skip_serializing_if = "Option::is_none")]
    pub check_in_code: Option<String>,
}

impl Event {
    /// Start authoring a new event for `owner`
    pub fn draft(name: impl Into<String>, owner: i64) -> Self {
        Self {
            name: name.into(),
            user_id: owner,
            ..Default::default()
        }
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    /// Record a participant back-reference. Returns false if already present.
    pub fn add_participant(&mut self, participant_id: &str) -> bool {
        if self.participants.iter().any(|id| id == participant_id) {
            return false;
        }
        self.participants.push(participant_id.to_string());
        true
    }

    pub fn has_check_in_code(&self) -> bool {
        self.check_in_code.as_deref().is_some_and(|code| !code.is_empty())
    }
}
