use crate::colour::colours;
use crate::config::CardLayout;
use crate::document::Document;
use crate::font::Font;
use crate::image::Image;
use crate::page::{ImageLayout, Page, RectLayout, SpanFont, SpanLayout};
use crate::profile::UserProfile;
use crate::rect::Rect;
use crate::units::Px;
use id_arena::Id;

/// The two faces a card is set in: a heading face for the title, username,
/// and ordinal, and a body face for paragraphs and the date line
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CardFonts {
    pub heading: Id<Font>,
    pub body: Id<Font>,
}

/// Everything shared by all cards of one post: the layout, the faces, the
/// title (rendered on card 0 only), the poster, and the date line
pub struct CardSpec<'a> {
    pub layout: &'a CardLayout,
    pub fonts: CardFonts,
    pub title: &'a str,
    pub profile: &'a UserProfile,
    pub avatar: Option<Id<Image>>,
    pub date_line: &'a str,
}

/// Break `text` into rendered lines, wrapping character-by-character against
/// real glyph advances.
///
/// Wrapping at exact character boundaries, not word boundaries, is the
/// strategy that works for CJK body text with no word spaces; Latin words
/// may split at the edge. Embedded newlines force a break. Text that cannot
/// fit a single character per line still takes one character per line rather
/// than looping forever.
pub fn break_into_lines<F: Fn(char) -> Px>(text: &str, max_width: Px, advance: F) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut width = Px::ZERO;

    for ch in text.chars() {
        if ch == '\n' {
            lines.push(std::mem::take(&mut line));
            width = Px::ZERO;
            continue;
        }

        let advance = advance(ch);
        if width + advance > max_width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            width = Px::ZERO;
        }
        line.push(ch);
        width += advance;
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Lay one paginated card out as a [Page].
///
/// The space reserved for the title and header comes from the same
/// [CardLayout] the paginator read, so the two stay in sync by construction.
/// This function never fails: a card that was forced to hold an oversized
/// paragraph simply draws past the bottom padding.
pub fn render_card(
    doc: &Document,
    spec: &CardSpec,
    paragraphs: &[String],
    page_index: usize,
) -> Page {
    let layout = spec.layout;
    let mut page = Page::new(layout.width, layout.height, layout.padding_x, layout.padding_y);

    page.add_rect(RectLayout {
        position: page.media_box,
        colour: colours::PAPER,
    });

    let first = page_index == 0;
    if first {
        draw_header(doc, spec, &mut page);
    }

    // the layout cursor grows downward from the top padding; baselines are
    // flipped into PDF coordinates as spans are emitted
    let mut y = layout.padding_y;
    if first {
        y += layout.header_offset;
    }

    let heading = &doc.fonts[spec.fonts.heading];
    let body = &doc.fonts[spec.fonts.body];

    if first && !spec.title.trim().is_empty() {
        let title_line_height = layout.title_size * layout.title_leading;
        for line in break_into_lines(spec.title.trim(), layout.content_width(), |ch| {
            heading.char_advance(ch, layout.title_size)
        }) {
            let baseline = y + line_baseline(heading, layout.title_size, title_line_height);
            page.add_span(SpanLayout {
                text: line,
                font: SpanFont {
                    id: spec.fonts.heading,
                    size: layout.title_size,
                },
                colour: colours::TITLE_INK,
                coords: (layout.padding_x, layout.height - baseline),
            });
            y += title_line_height;
        }
        y += layout.title_gap;
    }

    for paragraph in paragraphs {
        for line in break_into_lines(paragraph, layout.content_width(), |ch| {
            body.char_advance(ch, layout.body_size)
        }) {
            let baseline = y + line_baseline(body, layout.body_size, layout.line_height);
            page.add_span(SpanLayout {
                text: line,
                font: SpanFont {
                    id: spec.fonts.body,
                    size: layout.body_size,
                },
                colour: colours::INK,
                coords: (layout.padding_x, layout.height - baseline),
            });
            y += layout.line_height;
        }
        y += layout.paragraph_gap;
    }

    // page ordinal, bottom right
    let ordinal = (page_index + 1).to_string();
    let ordinal_width = heading.text_width(&ordinal, layout.footer_size);
    page.add_span(SpanLayout {
        text: ordinal,
        font: SpanFont {
            id: spec.fonts.heading,
            size: layout.footer_size,
        },
        colour: colours::FAINT,
        coords: (
            layout.width - layout.footer_inset - ordinal_width,
            layout.footer_inset,
        ),
    });

    page
}

/// Baseline offset from the top of a line box: the text is centred within
/// the line height, then pushed down by the ascender
fn line_baseline(font: &Font, size: Px, line_height: Px) -> Px {
    let ascent = font.ascent(size);
    let descent = font.descent(size);
    (line_height - (ascent - descent)) * 0.5 + ascent
}

fn draw_header(doc: &Document, spec: &CardSpec, page: &mut Page) {
    let layout = spec.layout;
    let heading = &doc.fonts[spec.fonts.heading];
    let body = &doc.fonts[spec.fonts.body];

    let avatar_box = Rect::from_xywh(
        layout.padding_x,
        layout.height - layout.padding_y - layout.avatar_size,
        layout.avatar_size,
        layout.avatar_size,
    );

    match spec.avatar {
        Some(id) => page.add_image(ImageLayout {
            id,
            position: avatar_box,
        }),
        None => {
            // grey placeholder tile carrying the poster's initial
            page.add_rect(RectLayout {
                position: avatar_box,
                colour: colours::PLACEHOLDER,
            });
            let initial = spec.profile.initial().to_string();
            let initial_size = layout.avatar_size * 0.4;
            let initial_width = heading.text_width(&initial, initial_size);
            let ascent = heading.ascent(initial_size);
            let descent = heading.descent(initial_size);
            page.add_span(SpanLayout {
                text: initial,
                font: SpanFont {
                    id: spec.fonts.heading,
                    size: initial_size,
                },
                colour: colours::MUTED,
                coords: (
                    avatar_box.x1 + (layout.avatar_size - initial_width) * 0.5,
                    avatar_box.y1 + (layout.avatar_size - (ascent - descent)) * 0.5 - descent,
                ),
            });
        }
    }

    // username and date stack to the right of the avatar, centred on it
    let text_x = layout.padding_x + layout.avatar_size + layout.avatar_size * 0.32;
    let line_gap = layout.header_size * 0.22;
    let block_height = layout.header_size * 2.0 + line_gap;
    let block_top = layout.padding_y + (layout.avatar_size - block_height) * 0.5;

    let username_baseline = block_top + heading.ascent(layout.header_size);
    page.add_span(SpanLayout {
        text: spec.profile.username.clone(),
        font: SpanFont {
            id: spec.fonts.heading,
            size: layout.header_size,
        },
        colour: colours::HEADER_INK,
        coords: (text_x, layout.height - username_baseline),
    });

    let date_baseline =
        block_top + layout.header_size + line_gap + body.ascent(layout.header_size);
    page.add_span(SpanLayout {
        text: spec.date_line.to_string(),
        font: SpanFont {
            id: spec.fonts.body,
            size: layout.header_size,
        },
        colour: colours::MUTED,
        coords: (text_x, layout.height - date_baseline),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    /// a fake monospaced advance so wrapping is testable without font files
    fn ten_px(_ch: char) -> Px {
        Px(10.0)
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(
            break_into_lines("abc", Px(100.0), ten_px),
            vec!["abc".to_string()]
        );
    }

    #[test]
    fn wraps_at_the_exact_character_boundary() {
        assert_eq!(
            break_into_lines("abcdefgh", Px(30.0), ten_px),
            vec!["abc".to_string(), "def".into(), "gh".into()]
        );
    }

    #[test]
    fn embedded_newlines_force_breaks() {
        assert_eq!(
            break_into_lines("ab\ncd", Px(100.0), ten_px),
            vec!["ab".to_string(), "cd".into()]
        );
    }

    #[test]
    fn impossibly_narrow_lines_take_one_character_each() {
        assert_eq!(
            break_into_lines("abc", Px(5.0), ten_px),
            vec!["a".to_string(), "b".into(), "c".into()]
        );
    }

    #[test]
    fn empty_text_produces_no_lines() {
        assert!(break_into_lines("", Px(100.0), ten_px).is_empty());
    }

    #[test]
    fn variable_advances_are_respected() {
        // 'w' is twice as wide as everything else
        let advance = |ch: char| if ch == 'w' { Px(20.0) } else { Px(10.0) };
        assert_eq!(
            break_into_lines("wwab", Px(40.0), advance),
            vec!["ww".to_string(), "ab".into()]
        );
    }
}
