use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum CardError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// [serde_json] failed to parse or serialize
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    /// [reqwest] failed to complete the request
    Http(#[from] reqwest::Error),

    /// No API key was configured for the rewrite service
    #[error("no API key configured for the rewrite service")]
    MissingApiKey,

    /// The rewrite service returned something other than a `{title, body}` object
    #[error("rewrite service returned a malformed reply: {0}")]
    MalformedRewrite(&'static str),

    /// A page referenced in the page order was not present in the document
    #[error("page is missing from the document")]
    PageMissing,
}
