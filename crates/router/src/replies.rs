//! Canned reply texts and the phrase matcher for inbound text messages.

/// Reply to a first-time follower.
pub const WELCOME: &str =
    "Thanks for following! Send me a message any time and I'll reply.";

/// Reply to a follower the store already knew about.
pub const WELCOME_BACK: &str = "Welcome back!";

/// Reply to a thank-you message.
pub const THANKS_REPLY: &str = "You're welcome! Anything else I can help with?";

/// Reply when no phrase category matches. Always sent; the matcher never
/// leaves a text message unanswered.
pub const FALLBACK: &str = "Sorry, I didn't catch that. Try \"hello\" or \"user id\".";

const GREETINGS: &[&str] = &["hello", "hi", "hey", "สวัสดี", "หวัดดี"];
const THANKS: &[&str] = &["thanks", "thank you", "ขอบคุณ"];

/// Greeting reply, addressed to the sender by identifier.
#[must_use]
pub fn greeting(user_id: &str) -> String {
    format!("Hello! Your user ID is {user_id}.")
}

/// Pick the reply for an inbound text message. Matching is done on the
/// trimmed, lowercased text; unmatched messages get [`FALLBACK`].
#[must_use]
pub fn reply_for_text(user_id: &str, text: &str) -> String {
    let normalized = text.trim().to_lowercase();
    if GREETINGS.contains(&normalized.as_str()) {
        greeting(user_id)
    } else if THANKS.contains(&normalized.as_str()) {
        THANKS_REPLY.to_string()
    } else if normalized.contains("user id") {
        format!("Your user ID is {user_id}.")
    } else {
        FALLBACK.to_string()
    }
}
