//! Mission debrief: a summary of the conversation requested from the
//! assistant itself.

use r3aler_common::{Message, Sender};

pub const DEBRIEF_PROMPT: &str = "Generate a debrief based on this conversation log:";

pub const NOT_ENOUGH_DATA: &str = "Not enough conversation data to generate a debrief.";

/// Shorter transcripts are not worth a request.
pub const MIN_TRANSCRIPT_CHARS: usize = 10;

/// `USER: ...` / `AI: ...` lines for the dialogue turns of `messages`.
pub fn format_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .filter_map(|m| match m.sender {
            Sender::User => Some(format!("USER: {}", m.text)),
            Sender::Assistant => Some(format!("AI: {}", m.text)),
            Sender::System => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The prompt sent for `transcript`, or `None` when it is too short.
pub fn debrief_prompt(transcript: &str) -> Option<String> {
    if transcript.chars().count() < MIN_TRANSCRIPT_CHARS {
        return None;
    }
    Some(format!("{DEBRIEF_PROMPT}\n{transcript}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(sender: Sender, text: &str, sequence: u64) -> Message {
        Message {
            sender,
            text: text.into(),
            sequence,
        }
    }

    #[test]
    fn transcript_skips_system_notices() {
        let log = vec![
            msg(Sender::System, "Welcome", 1),
            msg(Sender::User, "scan the perimeter", 2),
            msg(Sender::Assistant, "Perimeter clear.", 3),
        ];
        assert_eq!(
            format_transcript(&log),
            "USER: scan the perimeter\nAI: Perimeter clear."
        );
    }

    #[test]
    fn short_transcript_yields_no_prompt() {
        assert_eq!(debrief_prompt(""), None);
        assert_eq!(debrief_prompt("USER: hi"), None);
    }

    #[test]
    fn prompt_prefixes_instruction() {
        let prompt = debrief_prompt("USER: hello there").unwrap();
        assert!(prompt.starts_with(DEBRIEF_PROMPT));
        assert!(prompt.ends_with("USER: hello there"));
    }
}
