use crate::units::Px;

/// The shared layout configuration for a card design.
///
/// Both the paginator and the rendering surface read from the same
/// `CardLayout`, so the space the estimator assumes for the title and header
/// is, by construction, the space the renderer actually reserves. Construct
/// one at startup and treat it as immutable; tuning any of the heuristic
/// fields re-tunes estimation and rendering together.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    /// Canvas width in pixels
    pub width: Px,
    /// Canvas height in pixels
    pub height: Px,
    /// Horizontal padding on each side of the canvas
    pub padding_x: Px,
    /// Vertical padding at the top and bottom of the canvas
    pub padding_y: Px,

    /// Font size of the title on the first card
    pub title_size: Px,
    /// Line height of the title, as a multiple of `title_size`
    pub title_leading: f32,
    /// Vertical gap between the title and the first paragraph
    pub title_gap: Px,
    /// Font size of body text
    pub body_size: Px,
    /// Line height of body text
    pub line_height: Px,
    /// Vertical gap below each paragraph
    pub paragraph_gap: Px,
    /// Font size of the username and date in the header block
    pub header_size: Px,
    /// Edge length of the (square) avatar in the header block
    pub avatar_size: Px,
    /// Vertical offset from the top padding to where first-page content starts,
    /// clearing the header block
    pub header_offset: Px,
    /// Font size of the page ordinal in the bottom-right corner
    pub footer_size: Px,
    /// Inset of the page ordinal from the bottom-right corner
    pub footer_inset: Px,

    /// Average number of body-sized characters that fit on one rendered line
    pub chars_per_line: f32,
    /// Estimated line capacity of the first card, before subtracting the
    /// title and header costs
    pub max_lines_first_page: f32,
    /// Estimated line capacity of every card after the first
    pub max_lines_other_page: f32,
    /// Extra cost, in lines, of the gap below each paragraph
    pub margin_bottom_cost: f32,
    /// Slack allowed past a card's capacity before a break is forced; the
    /// character-count heuristic is imprecise, and a small overshoot beats a
    /// premature break
    pub overflow_tolerance: f32,
    /// Multiplier applied to the title's line estimate, accounting for the
    /// title's larger font
    pub title_line_factor: f32,
    /// Flat cost, in lines, of the spacing around a non-empty title
    pub title_base_cost: f32,
    /// Flat cost, in lines, of the avatar/username header block
    pub header_cost: f32,
    /// Floor on the first card's body capacity, so a very long title can
    /// never make the first card unusable
    pub min_body_lines: f32,
    /// A final card whose total cost is below this many lines is considered
    /// too sparse
    pub sparse_page_lines: f32,
    /// A second-to-last card must cost more than this many lines before it
    /// gives a paragraph away to a sparse final card
    pub headroom_lines: f32,
}

impl Default for CardLayout {
    fn default() -> CardLayout {
        CardLayout {
            width: Px(1242.0),
            height: Px(1660.0),
            padding_x: Px(90.0),
            padding_y: Px(100.0),

            title_size: Px(80.0),
            title_leading: 1.2,
            title_gap: Px(40.0),
            body_size: Px(40.0),
            line_height: Px(72.0),
            paragraph_gap: Px(48.0),
            header_size: Px(36.0),
            avatar_size: Px(100.0),
            header_offset: Px(180.0),
            footer_size: Px(24.0),
            footer_inset: Px(40.0),

            chars_per_line: 26.5,
            max_lines_first_page: 21.5,
            max_lines_other_page: 21.5,
            margin_bottom_cost: 0.6,
            overflow_tolerance: 0.5,
            title_line_factor: 2.5,
            title_base_cost: 1.5,
            header_cost: 4.0,
            min_body_lines: 4.0,
            sparse_page_lines: 3.0,
            headroom_lines: 10.0,
        }
    }
}

impl CardLayout {
    /// The width available to content between the horizontal paddings
    pub fn content_width(&self) -> Px {
        self.width - self.padding_x * 2.0
    }

    /// A copy of this layout with all pixel dimensions multiplied by
    /// `factor`. The estimation constants are dimensionless and are left
    /// untouched, so pagination is identical at any scale; only the rendered
    /// output shrinks or grows.
    pub fn scaled(&self, factor: f32) -> CardLayout {
        CardLayout {
            width: self.width * factor,
            height: self.height * factor,
            padding_x: self.padding_x * factor,
            padding_y: self.padding_y * factor,
            title_size: self.title_size * factor,
            title_gap: self.title_gap * factor,
            body_size: self.body_size * factor,
            line_height: self.line_height * factor,
            paragraph_gap: self.paragraph_gap * factor,
            header_size: self.header_size * factor,
            avatar_size: self.avatar_size * factor,
            header_offset: self.header_offset * factor,
            footer_size: self.footer_size * factor,
            footer_inset: self.footer_inset * factor,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_leaves_estimation_constants_alone() {
        let layout = CardLayout::default();
        let half = layout.scaled(0.5);
        assert_eq!(half.width, Px(621.0));
        assert_eq!(half.height, Px(830.0));
        assert_eq!(half.body_size, Px(20.0));
        assert_eq!(half.chars_per_line, layout.chars_per_line);
        assert_eq!(half.max_lines_first_page, layout.max_lines_first_page);
        assert_eq!(half.margin_bottom_cost, layout.margin_bottom_cost);
    }

    #[test]
    fn content_width_subtracts_both_paddings() {
        let layout = CardLayout::default();
        assert_eq!(layout.content_width(), Px(1242.0 - 180.0));
    }
}
