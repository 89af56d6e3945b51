//! Prompt construction for reply generation

use super::catalog::WritingStyle;

/// Instruction that opens every prompt, before the style-specific text
pub const REPLY_INSTRUCTION: &str =
    "Generate a professional email response to the following email.";

/// Build the single prompt string sent to either provider.
///
/// The email is inserted verbatim: no truncation, escaping or sanitization.
pub fn build_prompt(email_content: &str, style: &WritingStyle) -> String {
    format!(
        "{} {}\n\nOriginal Email:\n{}\n\nResponse:",
        REPLY_INSTRUCTION, style.instruction, email_content
    )
}
