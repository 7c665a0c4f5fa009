use crate::content::ContentData;
use crate::error::CardError;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for the generative rewrite service.
///
/// Takes the user's raw combined title+body text and asks the model to
/// return a polished `{title, body}` pair, with `\n` markers in the body for
/// paragraph breaks. Every failure mode (missing key, network, malformed
/// reply) comes back as a single [CardError] and the caller's existing
/// content is left untouched.
pub struct RewriteClient {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl RewriteClient {
    /// A client reading the API key from the `GEMINI_API_KEY` environment
    /// variable. Fails immediately if the key is unset, rather than on the
    /// first request.
    pub fn from_env() -> Result<RewriteClient, CardError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| CardError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    pub fn new<S: ToString>(api_key: S) -> RewriteClient {
        RewriteClient {
            client: reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .expect("default TLS backend is available"),
            api_key: api_key.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: API_BASE.to_string(),
        }
    }

    /// Override the model name
    pub fn with_model<S: ToString>(mut self, model: S) -> RewriteClient {
        self.model = model.to_string();
        self
    }

    /// Override the API base URL, mostly for testing against a local server
    pub fn with_base_url<S: ToString>(mut self, base_url: S) -> RewriteClient {
        self.base_url = base_url.to_string();
        self
    }

    /// Rewrite `text` into a polished title and body
    pub fn polish(&self, text: &str) -> Result<ContentData, CardError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = json!({
            "contents": [{ "parts": [{ "text": polish_prompt(text) }] }],
            "generationConfig": { "responseMimeType": "application/json" },
        });

        let response: GenerateContentResponse = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .inspect_err(|err| tracing::warn!(%err, "rewrite request failed"))?
            .json()?;

        let reply = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(CardError::MalformedRewrite("reply has no candidates"))?;

        ContentData::from_reply(&reply)
            .inspect_err(|err| tracing::warn!(%err, "rewrite reply could not be parsed"))
    }
}

fn polish_prompt(text: &str) -> String {
    format!(
        r#"You are an expert social-media copywriter.
Please rewrite the following text to be engaging, aesthetic, and formatted for a slide deck.

1. Extract or create a catchy, short title (max 10 chars).
2. Polish the body text. Use emotive language, correct punctuation, and ensure it flows well.
3. The tone should be "chill", "aesthetic", and "literary".
4. Return ONLY a valid JSON object with the following structure:
{{
  "title": "String",
  "body": "String (use \n for line breaks)"
}}

Original Text:
{text}
"#
    )
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_reported_up_front() {
        // run in a scope where the variable is guaranteed absent
        std::env::remove_var("GEMINI_API_KEY");
        assert!(matches!(
            RewriteClient::from_env(),
            Err(CardError::MissingApiKey)
        ));
    }

    #[test]
    fn prompt_embeds_the_original_text() {
        let prompt = polish_prompt("my draft");
        assert!(prompt.contains("my draft"));
        assert!(prompt.contains(r#""title""#));
    }

    #[test]
    fn response_shape_parses() {
        let raw = r#"{
            "candidates": [{
                "content": { "parts": [{ "text": "{\"title\":\"t\",\"body\":\"b\"}" }] }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let text = &response.candidates[0].content.parts[0].text;
        let content = ContentData::from_reply(text).unwrap();
        assert_eq!(content, ContentData::new("t", "b"));
    }
}
