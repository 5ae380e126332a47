//! Keyboard builders shared by both bots

use crate::models::{QuestionType, RsvpQuestion};
use crate::services::gateway::{InlineButton, Markup};

pub const CANCEL: &str = "Cancel";
pub const ADD_IMAGE: &str = "Yes, add an image";
pub const NO_IMAGE: &str = "No, skip image";

pub fn cancel() -> Markup {
    Markup::reply_column([CANCEL])
}

/// Offer to attach an image to an event detail
pub fn detail_image_choice() -> Markup {
    Markup::Reply(vec![vec![ADD_IMAGE.to_string(), NO_IMAGE.to_string()], vec![CANCEL.to_string()]])
}

pub fn skip_or_cancel() -> Markup {
    Markup::Reply(vec![vec!["skip".to_string()], vec![CANCEL.to_string()]])
}

pub fn done_or_cancel() -> Markup {
    Markup::Reply(vec![vec!["done".to_string()], vec![CANCEL.to_string()]])
}

pub fn rsvp_types() -> Markup {
    Markup::Reply(vec![
        vec!["1".to_string(), "2".to_string(), "3".to_string(), "4".to_string()],
        vec![CANCEL.to_string()],
    ])
}

/// Lowercase yes/no, as the organiser flow expects
pub fn yes_no_or_cancel() -> Markup {
    Markup::Reply(vec![vec!["yes".to_string(), "no".to_string()], vec![CANCEL.to_string()]])
}

pub fn yes_no() -> Markup {
    Markup::reply_row(["yes", "no"])
}

/// Yes/no with `0` to skip
pub fn yes_no_or_skip() -> Markup {
    Markup::Reply(vec![vec!["yes".to_string(), "no".to_string()], vec!["0".to_string()]])
}

/// Answer buttons for an RSVP question, if its type has fixed choices
pub fn rsvp_answers(question: &RsvpQuestion) -> Markup {
    match question.question_type {
        QuestionType::YesNo | QuestionType::Mcq => Markup::reply_column(question.options.iter().cloned()),
        QuestionType::MultiSelect | QuestionType::ShortAnswer => Markup::RemoveKeyboard,
    }
}

/// Numbered buttons `1..=count` plus `0` to skip
pub fn numbered_choice(count: usize) -> Markup {
    let mut row: Vec<String> = (1..=count).map(|n| n.to_string()).collect();
    row.push("0".to_string());
    Markup::Reply(row.chunks(4).map(|chunk| chunk.to_vec()).collect())
}

pub fn join_link(url: &str) -> Markup {
    Markup::Inline(vec![vec![InlineButton::url("Open join link", url)]])
}
