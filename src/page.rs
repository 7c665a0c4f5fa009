use crate::colour::Colour;
use crate::font::Font;
use crate::image::Image;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Px;
use crate::CardError;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};
use std::io::Write;

/// Which font to draw a span with, and at what size
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Px,
}

/// A single run of text, positioned at its baseline start
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Px, Px),
}

/// An image stretched over a rectangle
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub id: Id<Image>,
    pub position: Rect,
}

/// A filled rectangle, used for the card background and the avatar
/// placeholder
#[derive(Clone, PartialEq, Debug)]
pub struct RectLayout {
    pub position: Rect,
    pub colour: Colour,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(SpanLayout),
    Image(ImageLayout),
    Rect(RectLayout),
}

/// One rendered card: a fixed-size page and its laid-out contents.
///
/// Coordinates are in canvas pixels with the PDF's bottom-left origin;
/// layout code that thinks top-down subtracts from the page height.
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content lives, i.e. within the paddings
    pub content_box: Rect,
    /// The laid out contents, drawn in order
    pub contents: Vec<PageContents>,
}

impl Page {
    /// Create a page of `width` × `height` pixels with symmetric paddings
    pub fn new(width: Px, height: Px, padding_x: Px, padding_y: Px) -> Page {
        Page {
            media_box: Rect {
                x1: Px::ZERO,
                y1: Px::ZERO,
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: padding_x,
                y1: padding_y,
                x2: width - padding_x,
                y2: height - padding_y,
            },
            contents: Vec::default(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(span));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    pub fn add_rect(&mut self, rect: RectLayout) {
        self.contents.push(PageContents::Rect(rect));
    }

    fn write_fill_colour(content: &mut Vec<u8>, colour: Colour) {
        match colour {
            Colour::RGB { r, g, b } => writeln!(content, "{r} {g} {b} rg").unwrap(),
            Colour::Grey { g } => writeln!(content, "{g} g").unwrap(),
        }
    }

    fn render(&self, fonts: &Arena<Font>) -> Vec<u8> {
        let mut content: Vec<u8> = Vec::default();

        for page_content in self.contents.iter() {
            match page_content {
                PageContents::Text(span) => {
                    let font = &fonts[span.font.id];
                    writeln!(&mut content, "q").unwrap();
                    Self::write_fill_colour(&mut content, span.colour);
                    writeln!(
                        &mut content,
                        "/F{} {} Tf",
                        span.font.id.index(),
                        span.font.size
                    )
                    .unwrap();
                    writeln!(&mut content, "BT").unwrap();
                    writeln!(&mut content, "{} {} Td", span.coords.0, span.coords.1).unwrap();
                    write!(&mut content, "<").unwrap();
                    for ch in span.text.chars() {
                        write!(&mut content, "{:04x}", font.glyph_id(ch).unwrap_or(0)).unwrap();
                    }
                    writeln!(&mut content, "> Tj").unwrap();
                    writeln!(&mut content, "ET").unwrap();
                    writeln!(&mut content, "Q").unwrap();
                }
                PageContents::Image(image) => {
                    writeln!(&mut content, "q").unwrap();
                    writeln!(
                        &mut content,
                        "{} 0 0 {} {} {} cm",
                        image.position.width(),
                        image.position.height(),
                        image.position.x1,
                        image.position.y1
                    )
                    .unwrap();
                    writeln!(&mut content, "/I{} Do", image.id.index()).unwrap();
                    writeln!(&mut content, "Q").unwrap();
                }
                PageContents::Rect(rect) => {
                    writeln!(&mut content, "q").unwrap();
                    Self::write_fill_colour(&mut content, rect.colour);
                    writeln!(
                        &mut content,
                        "{} {} {} {} re f",
                        rect.position.x1,
                        rect.position.y1,
                        rect.position.width(),
                        rect.position.height()
                    )
                    .unwrap();
                    writeln!(&mut content, "Q").unwrap();
                }
            }
        }

        content
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        writer: &mut Pdf,
    ) -> Result<(), CardError> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or(CardError::PageMissing)?;
        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(refs.get(RefType::PageTree).ok_or(CardError::PageMissing)?);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (i, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(i.index())) {
                resource_fonts.pair(Name(format!("F{}", i.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (i, _) in images.iter() {
            if let Some(image_ref) = refs.get(RefType::Image(i.index())) {
                resource_xobjects.pair(Name(format!("I{}", i.index()).as_bytes()), image_ref);
            }
        }
        resource_xobjects.finish();
        resources.finish();

        let content_id = refs.gen(RefType::ContentForPage(page_index));
        page.contents(content_id);
        page.finish();

        let rendered = self.render(fonts);
        writer.stream(content_id, rendered.as_slice());

        Ok(())
    }
}
