use crate::error::CardError;
use serde::{Deserialize, Serialize};

/// The raw post text: a title and a body.
///
/// The body's paragraphs are delimited by newlines, whether they were typed
/// by hand or decoded from a rewrite-service reply (where the JSON `\n`
/// escape produces the same character).
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentData {
    pub title: String,
    pub body: String,
}

impl ContentData {
    pub fn new<T: ToString, B: ToString>(title: T, body: B) -> ContentData {
        ContentData {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    /// Parse a rewrite-service reply. The reply must be a JSON object with
    /// exactly a `title` and a `body` string; anything else is rejected so a
    /// half-formed reply never silently replaces the user's content.
    pub fn from_reply(json: &str) -> Result<ContentData, CardError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let object = value
            .as_object()
            .ok_or(CardError::MalformedRewrite("reply is not an object"))?;

        let title = object
            .get("title")
            .and_then(|v| v.as_str())
            .ok_or(CardError::MalformedRewrite("missing `title` string"))?;
        let body = object
            .get("body")
            .and_then(|v| v.as_str())
            .ok_or(CardError::MalformedRewrite("missing `body` string"))?;

        Ok(ContentData::new(title, body))
    }
}
