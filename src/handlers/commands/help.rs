//! Introduction and help texts

pub fn organiser_start_text() -> &'static str {
    "Hello! I'm your EventBot. Use the following commands to manage events:\n\
     /addEvent - Create a new event\n\
     /deleteEvent <Event_Reference_Code> - Delete an existing event\n\
     /listParticipants <Event_Reference_Code> - List participants of an event\n\
     /blast <Event_Reference_Code> - Send a message to all participants\n\
     /setCheckInCode <Event_Reference_Code> - Set the check-in code of an event\n\
     /viewEvents - View all your events\n\
     /help - Show this help message"
}

pub fn organiser_help_text() -> &'static str {
    "I'm your EventBot. I can help you manage events.\n\n\
     Use /addEvent to start creating an event. You can send 'Cancel' at any step to stop.\n\
     Use /viewEvents to see the events you created and their Reference Codes.\n\
     Use /deleteEvent, /listParticipants, /blast or /setCheckInCode with a Reference Code to manage an event."
}

pub fn participant_start_text(name: &str) -> String {
    format!(
        "Hey {}! I'm your friendly event companion, here to make attending your events smooth and enjoyable.\n\n\
         Here's how I can help:\n\
         Quickly view events you're attending: /viewEvents\n\
         Revisit past events: /pastEvents\n\
         Join an event: /joinEvent\n\
         Easily check in at events using a simple code: /checkIn\n\
         Keep track of your own notes for each event: /notes\n\n\
         Just type /help anytime to see what else I can do for you!",
        name
    )
}

pub fn participant_help_text() -> &'static str {
    "Commands:\n\
     /start - Start interacting with me and see a quick introduction.\n\
     /viewEvents - View your upcoming events and details.\n\
     /pastEvents - See events you've attended previously.\n\
     /joinEvent - Join an event.\n\
     /checkIn - Check in to an event on the day.\n\
     /notes - View or edit your personal notes for an event.\n\
     /help - Get a reminder of commands and how to use me."
}

pub const UNKNOWN_COMMAND: &str = "I didn't understand that command. Use /start or /help.";
