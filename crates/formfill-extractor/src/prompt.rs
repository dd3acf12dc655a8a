//! Prompt construction for form extraction
//!
//! Every request carries exactly two messages: fixed system instructions with
//! the literal form schema, and a user task with the raw text interpolated
//! verbatim into a delimited block.

use formfill_domain::traits::ChatMessage;

const SYSTEM_INSTRUCTIONS: &str = r#"You are a helpful assistant designed to output JSON.
You are assisting a human fill out a complicated form.

The form has the following structure:
"""
name:
  first: string
  last: string

address:
  address01: string
  address02: string (optional)
  city: string
  state: string
  zipcode: string
"""

Complete the following task."#;

/// Build the two-message prompt for one extraction request.
pub fn build_messages(text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_INSTRUCTIONS),
        ChatMessage::user(build_task(text)),
    ]
}

fn build_task(text: &str) -> String {
    format!(
        r#"Task:
Given the following message, fill out the form from the message.
If there are any missing fields that are required by the form provide a 1 sentence helpful hint to the human for them to know how they should modify their message.
The hint should be focused and instructional.
When possible clean up the values of the form.
Only provide hints for missing fields.
If all required fields of the form are satisfied, set the "ready" field to true.

Message:
"""
{text}
"""

Your response should be in the following format:
{{
    "values": <JSON object of form fields>,
    "hint": <1 sentence hint>,
    "ready": <boolean when form is ready>
}}"#
    )
}
