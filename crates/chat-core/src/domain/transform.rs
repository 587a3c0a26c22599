//! Placeholder answer: every word reversed, wrapped in `||` markers.
//!
//! Words are runs of non-whitespace (Unicode `White_Space`). Reversal works on
//! Unicode scalar values, the same unit `split_whitespace` walks, so reversing
//! twice gives the original word back. Combining marks are not kept attached
//! to their base character.

pub const ANSWER_MARKER: &str = "||";

/// Reverse the characters of a single word.
pub fn reverse_word(word: &str) -> String {
    word.chars().rev().collect()
}

/// Reverse each whitespace-delimited word, keeping word order, single-spaced.
pub fn reverse_words(text: &str) -> String {
    text.split_whitespace()
        .map(reverse_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-cased role line shown once, at the top of the first answer.
pub fn role_banner(role: &str) -> String {
    format!("{}\n", role.to_uppercase())
}

/// `"||" + [ROLE + "\n"] + reversed words + "||"`.
pub fn placeholder_answer(question: &str, banner_role: Option<&str>) -> String {
    let mut answer = String::from(ANSWER_MARKER);
    if let Some(role) = banner_role {
        answer.push_str(&role_banner(role));
    }
    answer.push_str(reverse_words(question).trim());
    answer.push_str(ANSWER_MARKER);
    answer
}
