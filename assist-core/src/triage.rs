//! Advisory triage of completed model responses.
//!
//! A response whose leading portion reads like refusal or error boilerplate
//! is annotated, never suppressed: heuristics misfire, and the user still
//! wants to see what the model said.

/// How much of the response the triage scan inspects.
const LEADING_WINDOW_CHARS: usize = 300;

/// Phrases that suggest the model refused or the backend leaked an error.
const SUSPECT_PHRASES: &[&str] = &[
    "i'm sorry",
    "i am sorry",
    "i cannot",
    "i can't",
    "as an ai",
    "error:",
    "traceback (most recent call last)",
];

/// Scans the leading portion of `response` for refusal/error boilerplate.
///
/// Returns the first suspicious phrase found, lowercased, or `None` when
/// the response looks like a normal answer.
pub fn suspect_phrase(response: &str) -> Option<&'static str> {
    let head: String = response
        .chars()
        .take(LEADING_WINDOW_CHARS)
        .collect::<String>()
        .to_lowercase();
    SUSPECT_PHRASES.iter().find(|p| head.contains(**p)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_answer_is_clean() {
        let answer = "This function adds two numbers and returns the sum.";
        assert_eq!(suspect_phrase(answer), None);
    }

    #[test]
    fn refusal_is_flagged() {
        let answer = "I'm sorry, but I cannot help with that request.";
        assert_eq!(suspect_phrase(answer), Some("i'm sorry"));
    }

    #[test]
    fn traceback_is_flagged() {
        let answer = "Traceback (most recent call last):\n  File \"x.py\"";
        assert_eq!(
            suspect_phrase(answer),
            Some("traceback (most recent call last)")
        );
    }

    #[test]
    fn late_apology_is_ignored() {
        let mut answer = "The code is correct. ".repeat(30);
        answer.push_str("I'm sorry for the long answer.");
        assert_eq!(suspect_phrase(&answer), None);
    }
}
