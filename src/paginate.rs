//! Splits post text into card-sized pages without performing real layout.
//!
//! Rendering text off-screen to measure it would be exact, but the card
//! design is regular enough that a character-count heuristic gets within a
//! line of the truth: every string is charged `ceil(chars / chars_per_line)`
//! lines plus one line per embedded newline, and cards are filled greedily
//! against a per-card line budget. The first card pays for the title and the
//! avatar/username header out of its budget; a paragraph that won't fit
//! anywhere is isolated on its own card rather than split mid-paragraph.
//!
//! All functions here are pure: no I/O, no shared state, identical input
//! always yields an identical page sequence.

use crate::config::CardLayout;

/// One card's worth of body text, in paragraph order
pub type CardText = Vec<String>;

/// Estimate how many rendered lines of body-sized text `text` will occupy.
///
/// The estimate never under-counts the character term (it rounds up), so a
/// card filled to its estimated budget may end up short but should not
/// silently overflow.
pub fn estimate_lines(text: &str, layout: &CardLayout) -> f32 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let from_chars = (text.chars().count() as f32 / layout.chars_per_line).ceil();
    let from_newlines = text.matches('\n').count() as f32;
    from_chars + from_newlines
}

/// The total estimated cost of a card: each paragraph's line estimate plus
/// the gap below it
pub fn page_cost(page: &[String], layout: &CardLayout) -> f32 {
    page.iter()
        .map(|p| estimate_lines(p, layout) + layout.margin_bottom_cost)
        .sum()
}

/// The line budget available to body text on the first card, after the title
/// and header block have taken their share.
///
/// An empty (or whitespace-only) title is not rendered and costs nothing. A
/// non-empty title is charged at `title_line_factor` times its body-sized
/// line estimate, plus a flat `title_base_cost` for the spacing around it.
/// The result is clamped to `min_body_lines` so a very long title cannot
/// make the first card unusable.
pub fn first_page_capacity(title: &str, layout: &CardLayout) -> f32 {
    let title_cost = if title.trim().is_empty() {
        0.0
    } else {
        estimate_lines(title, layout) * layout.title_line_factor + layout.title_base_cost
    };

    (layout.max_lines_first_page - title_cost - layout.header_cost).max(layout.min_body_lines)
}

/// Split `body` into card-sized pages of whole paragraphs.
///
/// Paragraphs are the non-empty, trimmed lines of `body`, and they come back
/// out exactly as they went in: no paragraph is ever dropped, duplicated,
/// reordered, or split across cards. `title` is not placed on any card; it
/// only reduces the first card's budget. A body with no non-empty paragraphs
/// yields no cards at all, title or not.
///
/// Cards are filled first-fit: when a paragraph would exceed the current
/// card's budget (plus a small tolerance) it is re-tried against a fresh
/// card, except that a paragraph too large for even an empty card is placed
/// alone on its own card and allowed to overflow visually. A final
/// rebalancing nudge may move one paragraph onto a too-sparse last card.
pub fn paginate(title: &str, body: &str, layout: &CardLayout) -> Vec<CardText> {
    let paragraphs: Vec<&str> = body
        .split('\n')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut pages: Vec<CardText> = Vec::new();
    let mut current: CardText = Vec::new();
    let mut current_lines = 0.0_f32;
    let mut max_lines = first_page_capacity(title, layout);

    // the cursor only advances when a paragraph has found a home, so a
    // paragraph that closes a card is re-evaluated against the fresh one
    let mut next = 0usize;
    while next < paragraphs.len() {
        let para = paragraphs[next];
        let text_lines = estimate_lines(para, layout);

        // the overflow check deliberately leaves out the trailing gap: the
        // last paragraph's gap doesn't push content past the card edge
        if current_lines + text_lines > max_lines + layout.overflow_tolerance {
            if current.is_empty() {
                // too large for even an empty card; isolate it rather than
                // break mid-paragraph
                pages.push(vec![para.to_string()]);
                max_lines = layout.max_lines_other_page;
                current_lines = 0.0;
                next += 1;
                continue;
            }

            pages.push(std::mem::take(&mut current));
            current_lines = 0.0;
            max_lines = layout.max_lines_other_page;
        } else {
            current.push(para.to_string());
            current_lines += text_lines + layout.margin_bottom_cost;
            next += 1;
        }
    }

    if !current.is_empty() {
        pages.push(current);
    }

    rebalance_tail(&mut pages, layout);

    pages
}

/// If pagination left a visually sparse last card behind a well-filled one,
/// move the preceding card's final paragraph to the front of the last card.
/// At most one paragraph moves, and only between the final two cards; this
/// is a nudge, not an optimal balancing pass.
fn rebalance_tail(pages: &mut [CardText], layout: &CardLayout) {
    let n = pages.len();
    if n < 2 {
        return;
    }

    let last_lines = page_cost(&pages[n - 1], layout);
    let prev_lines = page_cost(&pages[n - 2], layout);

    if last_lines < layout.sparse_page_lines
        && prev_lines > layout.headroom_lines
        && pages[n - 2].len() > 1
    {
        if let Some(moved) = pages[n - 2].pop() {
            pages[n - 1].insert(0, moved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> CardLayout {
        CardLayout::default()
    }

    /// A paragraph that estimates to two lines (cost 2.6 with the gap)
    fn two_line_para(i: usize) -> String {
        format!("{i:02} {}", "x".repeat(37))
    }

    #[test]
    fn empty_input_yields_no_pages() {
        assert!(paginate("", "", &layout()).is_empty());
    }

    #[test]
    fn title_only_input_yields_no_pages() {
        assert!(paginate("A title", "", &layout()).is_empty());
        assert!(paginate("A title", "\n  \n\t\n", &layout()).is_empty());
    }

    #[test]
    fn short_body_fits_on_one_page() {
        let pages = paginate("Hi", "Short line.", &layout());
        assert_eq!(pages, vec![vec!["Short line.".to_string()]]);
    }

    #[test]
    fn estimate_is_zero_for_blank_text() {
        assert_eq!(estimate_lines("", &layout()), 0.0);
        assert_eq!(estimate_lines("   \t  ", &layout()), 0.0);
    }

    #[test]
    fn estimate_rounds_characters_up_and_charges_newlines() {
        let layout = layout();
        assert_eq!(estimate_lines("a", &layout), 1.0);
        assert_eq!(estimate_lines(&"a".repeat(27), &layout), 2.0);
        assert_eq!(estimate_lines("one\ntwo", &layout), 2.0);
    }

    #[test]
    fn estimate_counts_chars_not_bytes() {
        let layout = layout();
        // 26 CJK characters are one estimated line even though they are 78 bytes
        assert_eq!(estimate_lines(&"字".repeat(26), &layout), 1.0);
    }

    #[test]
    fn thirty_paragraphs_conserve_order_across_pages() {
        let layout = layout();
        let paragraphs: Vec<String> = (0..30).map(two_line_para).collect();
        let body = paragraphs.join("\n");

        let pages = paginate("", &body, &layout);
        assert!(pages.len() >= 2);
        assert!(pages.iter().all(|p| !p.is_empty()));

        let flattened: Vec<String> = pages.iter().flatten().cloned().collect();
        assert_eq!(flattened, paragraphs);

        for (i, page) in pages.iter().enumerate() {
            let budget = if i == 0 {
                first_page_capacity("", &layout)
            } else {
                layout.max_lines_other_page
            };
            // the final gap is not charged against the card edge
            let spent = page_cost(page, &layout) - layout.margin_bottom_cost;
            assert!(
                spent <= budget + layout.overflow_tolerance,
                "page {i} spends {spent} of {budget}"
            );
        }
    }

    #[test]
    fn conservation_with_messy_whitespace() {
        let layout = layout();
        let body = "  first  \n\n\t\nsecond\n   \nthird   ";
        let pages = paginate("", body, &layout);
        let flattened: Vec<String> = pages.iter().flatten().cloned().collect();
        assert_eq!(flattened, vec!["first", "second", "third"]);
    }

    #[test]
    fn oversized_paragraph_is_isolated() {
        let layout = layout();
        let huge = "y".repeat(2000);
        let pages = paginate("", &huge, &layout);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0], vec![huge]);
    }

    #[test]
    fn oversized_paragraph_is_never_merged() {
        let layout = layout();
        let huge = "y".repeat(2000);
        let body = format!("before\n{huge}\nafter");
        let pages = paginate("", &body, &layout);

        let huge_page = pages
            .iter()
            .find(|p| p.iter().any(|para| para == &huge))
            .expect("oversized paragraph was placed");
        assert_eq!(huge_page.len(), 1);

        let flattened: Vec<String> = pages.iter().flatten().cloned().collect();
        assert_eq!(flattened, vec!["before".to_string(), huge, "after".into()]);
    }

    #[test]
    fn first_page_capacity_shrinks_as_title_grows() {
        let layout = layout();
        let mut previous = first_page_capacity("", &layout);
        assert_eq!(
            previous,
            layout.max_lines_first_page - layout.header_cost
        );

        for len in [1usize, 10, 30, 60, 120, 500] {
            let title = "t".repeat(len);
            let capacity = first_page_capacity(&title, &layout);
            assert!(capacity <= previous, "capacity grew at title length {len}");
            assert!(capacity >= layout.min_body_lines);
            previous = capacity;
        }

        // a pathological title bottoms out at the floor instead of going negative
        assert_eq!(
            first_page_capacity(&"t".repeat(10_000), &layout),
            layout.min_body_lines
        );
    }

    #[test]
    fn long_title_leaves_less_room_on_the_first_page() {
        let layout = layout();
        let paragraphs: Vec<String> = (0..10).map(two_line_para).collect();
        let body = paragraphs.join("\n");

        let without_title = paginate("", &body, &layout);
        let with_title = paginate(&"标题".repeat(10), &body, &layout);
        assert!(with_title[0].len() < without_title[0].len());
    }

    #[test]
    fn sparse_last_page_steals_one_paragraph() {
        let layout = layout();
        // seven two-line paragraphs fill the first card (cost 18.2 > 10),
        // then one short straggler lands alone (cost 1.6 < 3)
        let mut paragraphs: Vec<String> = (0..7).map(two_line_para).collect();
        paragraphs.push("End.".to_string());
        let body = paragraphs.join("\n");

        let pages = paginate("", &body, &layout);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 6);
        // the moved paragraph leads the last card, ahead of what was there
        assert_eq!(pages[1], vec![two_line_para(6), "End.".to_string()]);

        let flattened: Vec<String> = pages.iter().flatten().cloned().collect();
        assert_eq!(flattened, paragraphs);
    }

    #[test]
    fn rebalance_skips_a_prev_page_with_one_paragraph() {
        let layout = layout();
        let huge = "y".repeat(600);
        let body = format!("{huge}\nEnd.");
        let pages = paginate("", &body, &layout);
        // the oversized card may not give away its only paragraph
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0], vec![huge]);
        assert_eq!(pages[1], vec!["End.".to_string()]);
    }

    #[test]
    fn rebalance_moves_at_most_one_paragraph() {
        let layout = layout();
        let mut paragraphs: Vec<String> = (0..7).map(two_line_para).collect();
        paragraphs.push("End.".to_string());
        let body = paragraphs.join("\n");

        let pages = paginate("", &body, &layout);
        let last = pages.last().expect("at least one page");
        // still sparse-ish afterwards, but only one paragraph moved
        assert_eq!(last.len(), 2);
    }

    #[test]
    fn pagination_is_deterministic() {
        let layout = layout();
        let body: String = (0..25)
            .map(two_line_para)
            .collect::<Vec<_>>()
            .join("\n");
        let first = paginate("A title", &body, &layout);
        let second = paginate("A title", &body, &layout);
        assert_eq!(first, second);
    }
}
