//! Text rendering for events, participants and RSVP prompts

use crate::models::{Event, Participant, QuestionType, RsvpQuestion, SignedUpEvent};
use crate::utils::helpers::format_date;

/// Q&A block, each line prefixed by `indent`
pub fn event_details(event: &Event, indent: &str) -> String {
    let mut text = String::new();
    for detail in &event.event_details {
        text.push_str(&format!("{}- Q: {}\n", indent, detail.question));
        text.push_str(&format!("{}  A: {}\n", indent, detail.answer));
    }
    text
}

/// An organiser's events with details, RSVP questions and check-in status
pub fn organiser_events(events: &[Event], participant_username: &str) -> String {
    let mut text = String::from("Here are your events:\n");
    for event in events {
        text.push_str(&format!("- {} (Reference Code: {})\n", event.name, event.id));
        text.push_str(&format!("  Date: {}\n", format_date(event.event_date)));
        if !event.event_details.is_empty() {
            text.push_str("  Details:\n");
            text.push_str(&event_details(event, "    "));
        }
        if !event.rsvp_questions.is_empty() {
            text.push_str("  RSVP Questions:\n");
            for (index, question) in event.rsvp_questions.iter().enumerate() {
                text.push_str(&format!("    {}. {} ({})\n", index + 1, question.question, question.question_type));
                if !question.options.is_empty() && question.question_type != QuestionType::YesNo {
                    text.push_str(&format!("       Options: {}\n", question.options.join(", ")));
                }
            }
        }
        let check_in = if event.has_check_in_code() { "set" } else { "not set" };
        text.push_str(&format!("  Check-in code: {}\n", check_in));
        text.push_str(&format!("  Participants: {}\n", event.participants.len()));
        text.push_str(&format!(
            "  Join link: {}\n",
            crate::utils::helpers::join_deep_link(participant_username, &event.id)
        ));
    }
    text
}

/// Participant list of one event, including check-in state and RSVP answers
pub fn participant_list(event: &Event, participants: &[Participant]) -> String {
    let mut text = format!("Participants for event '{}':\n", event.name);
    for participant in participants {
        text.push_str(&format!("- Name: {}\n", participant.name));
        text.push_str(&format!("  Code: {}\n", participant.id));
        let Some(signup) = participant.signed_up_event(&event.id) else {
            continue;
        };
        text.push_str(&format!("  Checked in: {}\n", if signup.checked_in { "yes" } else { "no" }));
        for question in &event.rsvp_questions {
            let answer = signup
                .answer_for(&question.id)
                .map(|a| a.answers.join(", "))
                .unwrap_or_else(|| "(no answer)".to_string());
            text.push_str(&format!("  {}: {}\n", question.question, answer));
        }
    }
    text.push_str(&format!("Total: {}", participants.len()));
    text
}

/// Message sent to every participant by `/blast`
pub fn blast_message(message: &str, event: &Event) -> String {
    let mut text = format!("Message from the organiser:\n{}\n\n", message);
    if !event.event_details.is_empty() {
        text.push_str("Event Details:\n");
        text.push_str(&event_details(event, "  "));
        text.push('\n');
    }
    text.push_str(&format!(
        "Event Name: {}\nEvent Date: {}",
        event.name,
        format_date(event.event_date)
    ));
    text
}

/// Summary shown to a participant after joining
pub fn event_overview(event: &Event) -> String {
    let mut text = format!(
        "{}\nDate: {}\nReference Code: {}\n",
        event.name,
        format_date(event.event_date),
        event.id
    );
    if !event.event_details.is_empty() {
        text.push_str("Details:\n");
        text.push_str(&event_details(event, "  "));
    }
    text
}

/// One event in a participant's event list
pub fn participant_event_entry(event: &Event, signup: Option<&SignedUpEvent>) -> String {
    let mut text = format!("- {} (Event ID: {})\n", event.name, event.id);
    text.push_str(&format!("  Date: {}\n", format_date(event.event_date)));
    if !event.event_details.is_empty() {
        text.push_str("  Details:\n");
        text.push_str(&event_details(event, "    "));
    }
    if let Some(signup) = signup {
        text.push_str(&format!("  Checked in: {}\n", if signup.checked_in { "yes" } else { "no" }));
        if !signup.personal_notes.is_empty() {
            text.push_str("  You have personal notes for this event (/notes)\n");
        }
    }
    text
}

/// Prompt for question `index` of `total`
pub fn rsvp_question_prompt(question: &RsvpQuestion, index: usize, total: usize) -> String {
    let mut text = format!("Question {} of {}:\n{}\n", index + 1, total, question.question);
    match question.question_type {
        QuestionType::YesNo => text.push_str("Please answer Yes or No."),
        QuestionType::Mcq => text.push_str("Please choose one of the options below."),
        QuestionType::MultiSelect => {
            text.push_str("Options:\n");
            for (number, option) in question.options.iter().enumerate() {
                text.push_str(&format!("{}. {}\n", number + 1, option));
            }
            text.push_str("Reply with your choices separated by commas (e.g., Option A, Option C).");
        }
        QuestionType::ShortAnswer => text.push_str("Please type your answer."),
    }
    text
}

pub fn rsvp_type_menu() -> &'static str {
    "Select the type of question:\n\
     1. Yes/No\n\
     2. Multiple Choice (MCQ)\n\
     3. Multi-Select\n\
     4. Short Answer"
}
