//! End-to-end properties of the pagination heuristic over realistic bodies.

use card_gen::paginate::{estimate_lines, first_page_capacity, page_cost, paginate};
use card_gen::CardLayout;

/// The non-empty trimmed lines of a body, i.e. what pagination must conserve
fn paragraphs_of(body: &str) -> Vec<String> {
    body.split('\n')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn flatten(pages: &[Vec<String>]) -> Vec<String> {
    pages.iter().flatten().cloned().collect()
}

#[test]
fn long_generated_bodies_conserve_every_paragraph() {
    let layout = CardLayout::default();

    for words in [5usize, 15, 40, 80] {
        let body: String = (0..20)
            .map(|i| lipsum::lipsum_words_from_seed(words, i as u64))
            .collect::<Vec<_>>()
            .join("\n");

        let pages = paginate("A Seeded Title", &body, &layout);
        assert_eq!(flatten(&pages), paragraphs_of(&body), "words = {words}");
        assert!(pages.iter().all(|p| !p.is_empty()));
    }
}

#[test]
fn every_page_respects_its_budget_or_is_a_forced_overflow() {
    let layout = CardLayout::default();
    let body: String = (0..40)
        .map(|i| lipsum::lipsum_words_from_seed(12, i as u64))
        .collect::<Vec<_>>()
        .join("\n");

    let pages = paginate("Budget check", &body, &layout);
    assert!(pages.len() >= 2);

    for (i, page) in pages.iter().enumerate() {
        if page.len() == 1 {
            // possibly a forced single-paragraph overflow page; exempt
            continue;
        }
        let budget = if i == 0 {
            first_page_capacity("Budget check", &layout)
        } else {
            layout.max_lines_other_page
        };
        // the rebalancer may top up the final page by one paragraph
        let slack = if i == pages.len() - 1 {
            layout.sparse_page_lines + layout.margin_bottom_cost
        } else {
            0.0
        };
        let spent = page_cost(page, &layout) - layout.margin_bottom_cost;
        assert!(
            spent <= budget + layout.overflow_tolerance + slack,
            "page {i} spends {spent} of {budget}"
        );
    }
}

#[test]
fn pagination_is_idempotent_across_many_inputs() {
    let layout = CardLayout::default();
    for seed in 0..10u64 {
        let body = lipsum::lipsum_words_from_seed(300, seed).replace(". ", ".\n");
        let title = lipsum::lipsum_words_from_seed(3, seed);
        assert_eq!(
            paginate(&title, &body, &layout),
            paginate(&title, &body, &layout)
        );
    }
}

#[test]
fn a_wall_of_text_is_isolated_even_among_friends() {
    let layout = CardLayout::default();
    let wall = lipsum::lipsum_words_from_seed(400, 7).replace('\n', " ");
    assert!(estimate_lines(&wall, &layout) > layout.max_lines_other_page);

    let body = format!("short opener\n{wall}\nshort closer");
    let pages = paginate("", &body, &layout);

    let wall_pages: Vec<_> = pages
        .iter()
        .filter(|p| p.iter().any(|para| para == wall.trim()))
        .collect();
    assert_eq!(wall_pages.len(), 1);
    assert_eq!(wall_pages[0].len(), 1);
}

#[test]
fn custom_layouts_change_the_split_but_not_the_content() {
    let tight = CardLayout {
        max_lines_first_page: 8.0,
        max_lines_other_page: 8.0,
        ..CardLayout::default()
    };
    let roomy = CardLayout::default();

    let body: String = (0..12)
        .map(|i| lipsum::lipsum_words_from_seed(10, i as u64))
        .collect::<Vec<_>>()
        .join("\n");

    let tight_pages = paginate("", &body, &tight);
    let roomy_pages = paginate("", &body, &roomy);

    assert!(tight_pages.len() > roomy_pages.len());
    assert_eq!(flatten(&tight_pages), flatten(&roomy_pages));
}
