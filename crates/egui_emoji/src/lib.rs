//! Inline custom emoji for [`egui`](https://github.com/emilk/egui).
//!
//! [`EmojiLabel`] renders text containing `:shortcode:` markers, replacing each
//! recognized shortcode with a small inline visual: an image fetched through a
//! pluggable loader, an image the application already decoded, or a font glyph.
//! Unrecognized shortcodes (and shortcodes whose image failed to load) are kept
//! as literal text.
//!
//! ```
//! # egui::__run_test_ui(|ui| {
//! use egui_emoji::{Emoji, EmojiLabel};
//!
//! ui.add(EmojiLabel::new(
//!     "Hello :ferris:!",
//!     vec![Emoji::remote("ferris", "https://example.com/ferris.png")],
//! ));
//! # });
//! ```
//!
//! Remote emoji require a loader. The crate itself ships none by default:
//! install one with [`load::install_loader`] (or enable the `http` feature and
//! call [`loaders::install`]) during app setup, otherwise every remote emoji
//! falls back to its literal `:shortcode:` text.
//!
//! ## Feature flags
#![cfg_attr(feature = "document-features", doc = document_features::document_features!())]
#![forbid(unsafe_code)]

mod emoji;
mod label;
pub mod load;
#[cfg(feature = "http")]
pub mod loaders;
mod resolve;
mod text;

pub use crate::emoji::Emoji;
pub use crate::label::EmojiLabel;
pub use crate::load::{EmojiImageLoader, install_loader};
pub use crate::resolve::{EmojiVisual, ResolvedEmoji};
