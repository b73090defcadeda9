//! Prompt payloads and the fixed prompt templates
//!
//! Payload shape follows the model server's `/api/generate` request body.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Model used for every inference call
pub const MODEL_ID: &str = "llama3.1:8b-instruct-q8_0";

/// How long the model server keeps the model resident after a call
pub const KEEP_ALIVE: &str = "3h";

/// Request body for a single non-streaming generate call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPayload {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub keep_alive: String,
    /// Token continuation state from a previous reply; empty starts fresh
    pub context: Vec<i64>,
}

/// Build a payload for `prompt_text`, continuing from `context`
pub fn build_payload(prompt_text: &str, context: &[i64]) -> PromptPayload {
    PromptPayload {
        model: MODEL_ID.to_string(),
        prompt: prompt_text.to_string(),
        stream: false,
        keep_alive: KEEP_ALIVE.to_string(),
        context: context.to_vec(),
    }
}

/// Prompt asking the model to invent a band for `genre`
///
/// `today` grounds the tour date in the future.
pub fn band_info_prompt(genre: &str, today: NaiveDate) -> String {
    format!(
        "You are given a fictional genre: {genre}. Today's date is {today}. \
         Respond with fictional band information as a single JSON object with exactly these keys: \
         {{\"band_name\": string, \
         \"band_members\": array of 1 to 5 strings, \
         \"top_songs\": array of exactly 5 strings, \
         \"related_bands\": array of exactly 5 strings, \
         \"next_tour_date\": string in YYYY-MM-DD format}}. \
         In your response, give only the 1 JSON object with no markdown formatting, \
         no code fences, and no other output.",
        genre = genre,
        today = today.format("%Y-%m-%d"),
    )
}

/// Prompt asking the model to turn band info JSON into an HTML page
pub fn render_html_prompt(band_info_json: &str) -> String {
    format!(
        "Convert the following JSON describing a band into a complete, standalone HTML document \
         presenting the band. Do not use any templating syntax. \
         Respond with only the HTML document and no other output.\n\n{}",
        band_info_json
    )
}
