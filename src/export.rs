use crate::card::{render_card, CardFonts, CardSpec};
use crate::config::CardLayout;
use crate::content::ContentData;
use crate::document::Document;
use crate::error::CardError;
use crate::font::Font;
use crate::image::Image;
use crate::info::Info;
use crate::paginate::paginate;
use crate::profile::UserProfile;
use chrono::Local;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Raw bytes of the two faces a deck is set in
pub struct FaceData {
    pub heading: Vec<u8>,
    pub body: Vec<u8>,
}

/// Where exported cards land and what they are called
pub struct ExportOptions {
    /// Directory the card files are written into, created if absent
    pub out_dir: PathBuf,
    /// File stem; cards are named `{stem}-{ordinal}.pdf`
    pub stem: String,
}

impl Default for ExportOptions {
    fn default() -> ExportOptions {
        ExportOptions {
            out_dir: PathBuf::from("."),
            stem: "card".to_string(),
        }
    }
}

/// The rungs of the export fallback ladder, tried in order
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Fidelity {
    /// Embedded fonts and the full-resolution avatar
    Full,
    /// No external avatar asset; everything else intact
    NoExternalAssets,
    /// Half-scale canvas, thumbnailed avatar if one can be had at all
    Reduced,
}

/// Render every card of `content` and write each as its own single-page PDF
/// named by ordinal, returning the written paths in card order.
///
/// Each card is attempted at full fidelity first; on failure it is retried
/// without the avatar asset, and then once more at reduced scale and
/// quality. Only when the last rung also fails does the error surface, so a
/// broken avatar file degrades the output instead of sinking the export.
pub fn export_cards(
    content: &ContentData,
    profile: &UserProfile,
    faces: &FaceData,
    layout: &CardLayout,
    options: &ExportOptions,
) -> Result<Vec<PathBuf>, CardError> {
    let pages = paginate(&content.title, &content.body, layout);
    if pages.is_empty() {
        return Ok(Vec::new());
    }

    fs::create_dir_all(&options.out_dir)?;
    let date_line = Local::now().format("%Y.%m.%d").to_string();

    let mut written = Vec::with_capacity(pages.len());
    for (page_index, paragraphs) in pages.iter().enumerate() {
        let path = options
            .out_dir
            .join(card_file_name(&options.stem, page_index + 1));

        let mut outcome = Ok(());
        for fidelity in [Fidelity::Full, Fidelity::NoExternalAssets, Fidelity::Reduced] {
            outcome = write_card(
                &path, content, profile, faces, layout, paragraphs, page_index, &date_line,
                fidelity,
            );
            match &outcome {
                Ok(()) => break,
                Err(err) => {
                    tracing::warn!(
                        card = page_index + 1,
                        ?fidelity,
                        %err,
                        "card export attempt failed"
                    );
                }
            }
        }
        outcome?;

        tracing::debug!(path = %path.display(), "exported card");
        written.push(path);
    }

    Ok(written)
}

/// Render the whole deck into a single multi-page [Document], one card per
/// page. Used for previewing; the avatar is best-effort here, with failures
/// degrading to the placeholder rather than erroring.
pub fn render_deck(
    content: &ContentData,
    profile: &UserProfile,
    faces: &FaceData,
    layout: &CardLayout,
) -> Result<Document, CardError> {
    let pages = paginate(&content.title, &content.body, layout);
    let date_line = Local::now().format("%Y.%m.%d").to_string();

    let mut doc = Document::new();
    doc.set_info(deck_info(content, profile));
    let fonts = CardFonts {
        heading: doc.add_font(Font::load(faces.heading.clone())?),
        body: doc.add_font(Font::load(faces.body.clone())?),
    };

    let avatar = profile
        .avatar_path
        .as_deref()
        .and_then(|path| match Image::new_from_disk(path) {
            Ok(image) => Some(doc.add_image(image)),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "avatar could not be loaded, using placeholder");
                None
            }
        });

    let spec = CardSpec {
        layout,
        fonts,
        title: &content.title,
        profile,
        avatar,
        date_line: &date_line,
    };

    for (page_index, paragraphs) in pages.iter().enumerate() {
        let page = render_card(&doc, &spec, paragraphs, page_index);
        doc.add_page(page);
    }

    Ok(doc)
}

fn card_file_name(stem: &str, ordinal: usize) -> String {
    format!("{stem}-{ordinal}.pdf")
}

fn deck_info(content: &ContentData, profile: &UserProfile) -> Info {
    let mut info = Info::new();
    if !content.title.trim().is_empty() {
        info.title(content.title.trim());
    }
    info.author(&profile.username);
    info
}

#[allow(clippy::too_many_arguments)]
fn write_card(
    path: &Path,
    content: &ContentData,
    profile: &UserProfile,
    faces: &FaceData,
    layout: &CardLayout,
    paragraphs: &[String],
    page_index: usize,
    date_line: &str,
    fidelity: Fidelity,
) -> Result<(), CardError> {
    let layout = match fidelity {
        Fidelity::Reduced => layout.scaled(0.5),
        _ => layout.clone(),
    };

    let mut doc = Document::new();
    doc.set_info(deck_info(content, profile));
    let fonts = CardFonts {
        heading: doc.add_font(Font::load(faces.heading.clone())?),
        body: doc.add_font(Font::load(faces.body.clone())?),
    };

    let avatar = match fidelity {
        Fidelity::Full => profile
            .avatar_path
            .as_deref()
            .map(Image::new_from_disk)
            .transpose()?
            .map(|image| doc.add_image(image)),
        Fidelity::NoExternalAssets => None,
        Fidelity::Reduced => profile
            .avatar_path
            .as_deref()
            .and_then(|path| {
                Image::new_from_disk(path)
                    .and_then(|image| image.thumbnail(128))
                    .ok()
            })
            .map(|image| doc.add_image(image)),
    };

    let spec = CardSpec {
        layout: &layout,
        fonts,
        title: &content.title,
        profile,
        avatar,
        date_line,
    };

    let page = render_card(&doc, &spec, paragraphs, page_index);
    doc.add_page(page);

    let file = fs::File::create(path)?;
    doc.write(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_are_named_by_ordinal() {
        assert_eq!(card_file_name("card", 1), "card-1.pdf");
        assert_eq!(card_file_name("rednote", 12), "rednote-12.pdf");
    }

    #[test]
    fn empty_content_exports_nothing() {
        let faces = FaceData {
            heading: Vec::new(),
            body: Vec::new(),
        };
        let written = export_cards(
            &ContentData::new("title only", ""),
            &UserProfile::default(),
            &faces,
            &CardLayout::default(),
            &ExportOptions::default(),
        )
        .unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn unparseable_faces_fail_every_rung() {
        let faces = FaceData {
            heading: b"not a font".to_vec(),
            body: b"not a font".to_vec(),
        };
        let options = ExportOptions {
            out_dir: std::env::temp_dir().join(format!("card-gen-export-{}", std::process::id())),
            stem: "card".to_string(),
        };
        let result = export_cards(
            &ContentData::new("t", "body"),
            &UserProfile::default(),
            &faces,
            &CardLayout::default(),
            &options,
        );
        assert!(matches!(result, Err(CardError::FaceParsingError(_))));
        fs::remove_dir_all(&options.out_dir).ok();
    }
}
