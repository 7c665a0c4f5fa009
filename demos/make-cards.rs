use card_gen::paginate::paginate;
use card_gen::{
    CardLayout, ContentData, ExportOptions, FaceData, ProfileStore, RewriteClient, UserProfile,
};

/// Renders a short post into card PDFs in ./cards/.
///
/// Usage: make-cards <heading-font.ttf> <body-font.ttf>
///
/// Set GEMINI_API_KEY to run the draft through the rewrite service first.
fn main() {
    let mut args = std::env::args().skip(1);
    let (heading_path, body_path) = match (args.next(), args.next()) {
        (Some(h), Some(b)) => (h, b),
        _ => {
            eprintln!("usage: make-cards <heading-font.ttf> <body-font.ttf>");
            std::process::exit(1);
        }
    };

    let faces = FaceData {
        heading: std::fs::read(&heading_path).expect("can read heading font"),
        body: std::fs::read(&body_path).expect("can read body font"),
    };

    let profile = ProfileStore::new()
        .map(|store| store.load())
        .unwrap_or_else(UserProfile::default);

    let draft = ContentData::new(
        "Slow mornings",
        "There is a kind of quiet that only exists before the city wakes up.\n\
         I make coffee, open the window, and let the day arrive on its own schedule.\n\
         No feed, no inbox, just the light moving across the table.",
    );

    // polish the draft if a key is configured, otherwise post it as-is
    let content = match RewriteClient::from_env() {
        Ok(client) => match client.polish(&format!("{}\n{}", draft.title, draft.body)) {
            Ok(polished) => polished,
            Err(err) => {
                eprintln!("rewrite failed ({err}), keeping the draft");
                draft
            }
        },
        Err(_) => draft,
    };

    let layout = CardLayout::default();
    let pages = paginate(&content.title, &content.body, &layout);
    println!("{} card(s) to render", pages.len());

    let options = ExportOptions {
        out_dir: "cards".into(),
        stem: "card".into(),
    };
    let written = card_gen::export_cards(&content, &profile, &faces, &layout, &options)
        .expect("can export cards");
    for path in written {
        println!("wrote {}", path.display());
    }
}
