//! Prompt assembly for the career-coach chat.
//!
//! Each turn re-sends the whole transcript as one flattened prompt; nothing is
//! truncated or summarized, so prompts grow linearly with session length.

use crate::models::chat::ChatMessage;

/// Instruction that opens every chat prompt.
pub const CHAT_SYSTEM_INSTRUCTION: &str = "You are an expert AI Career Coach. Keep answers short.";

/// Marker that introduces extracted attachment text on the final user line.
pub const ATTACHED_PDF_MARKER: &str = "[ATTACHED PDF CONTENT]:";

/// Flattens the transcript into a role-prefixed prompt ending with the
/// current message.
///
/// The caller appends the current message to the transcript first, so it
/// appears both in the history block and (as `final_user_content`, together
/// with any attachment text) on the closing `USER:` line.
pub fn build_chat_prompt(transcript: &[ChatMessage], final_user_content: &str) -> String {
    let mut prompt = format!("{CHAT_SYSTEM_INSTRUCTION}\n\nHistory:\n");
    for message in transcript {
        prompt.push_str(message.role.label());
        prompt.push_str(": ");
        prompt.push_str(&message.content);
        prompt.push('\n');
    }
    prompt.push_str("\nUSER: ");
    prompt.push_str(final_user_content);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::ChatMessage;

    #[test]
    fn test_prompt_shape_with_history() {
        let transcript = vec![
            ChatMessage::user("How do I negotiate salary?"),
            ChatMessage::assistant("Anchor high and stay silent."),
            ChatMessage::user("What about equity?"),
        ];
        let prompt = build_chat_prompt(&transcript, "What about equity?");
        assert_eq!(
            prompt,
            "You are an expert AI Career Coach. Keep answers short.\n\n\
             History:\n\
             USER: How do I negotiate salary?\n\
             ASSISTANT: Anchor high and stay silent.\n\
             USER: What about equity?\n\
             \nUSER: What about equity?"
        );
    }

    #[test]
    fn test_attachment_text_only_on_final_line() {
        let transcript = vec![ChatMessage::user("Review my resume")];
        let final_content =
            format!("Review my resume\n\n{ATTACHED_PDF_MARKER}\nJane Doe, engineer");
        let prompt = build_chat_prompt(&transcript, &final_content);
        // The history block keeps the bare message; the marker appears once.
        assert_eq!(prompt.matches(ATTACHED_PDF_MARKER).count(), 1);
        assert!(prompt.ends_with("Jane Doe, engineer"));
    }
}
