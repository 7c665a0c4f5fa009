//! card-gen paginates post text onto fixed-size social-media cards and
//! renders each card as a PDF page.
//!
//! The interesting part is [paginate::paginate], which estimates rendered
//! text height from character counts instead of doing real layout, fills
//! cards greedily, and nudges the final card when it would come out too
//! sparse. Everything else — the card renderer, the per-card PDF export with
//! its fidelity fallback, the profile store, and the rewrite-service client —
//! is plumbing around that core.

mod card;
pub use card::*;

mod colour;
pub use colour::*;

mod config;
pub use config::*;

mod content;
pub use content::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod export;
pub use export::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

mod page;
pub use page::*;

/// The pagination heuristic: line estimation, card filling, and tail
/// rebalancing
pub mod paginate;

mod profile;
pub use profile::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod rewrite;
pub use rewrite::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
