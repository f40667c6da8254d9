use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use egui::ColorImage;

/// One custom emoji, identified by its shortcode.
///
/// The shortcode is the name between colons in the text: `"Hi :wave:"` refers
/// to an emoji with the shortcode `wave`. Shortcodes may contain ASCII
/// letters, digits, `_`, `+` and `-`, and should be unique within one
/// [`crate::EmojiLabel`].
#[derive(Clone)]
pub enum Emoji {
    /// An image fetched through the installed [`crate::load::EmojiImageLoader`].
    Remote {
        shortcode: String,

        /// Passed verbatim to the loader, e.g. `https://example.com/party_cat.png`.
        url: String,
    },

    /// An image the application has already decoded.
    Image {
        shortcode: String,
        image: Arc<ColorImage>,
    },

    /// A glyph from the installed fonts.
    ///
    /// egui's default fonts cover most emoji codepoints, and
    /// [`egui::special_emojis`] names a few extra ones.
    Glyph { shortcode: String, glyph: char },
}

impl Emoji {
    /// Emoji that is fetched from `url` through the installed loader.
    pub fn remote(shortcode: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Remote {
            shortcode: shortcode.into(),
            url: url.into(),
        }
    }

    /// Emoji from an image the application has already decoded.
    pub fn image(shortcode: impl Into<String>, image: impl Into<Arc<ColorImage>>) -> Self {
        Self::Image {
            shortcode: shortcode.into(),
            image: image.into(),
        }
    }

    /// Emoji rendered as a font glyph.
    pub fn glyph(shortcode: impl Into<String>, glyph: char) -> Self {
        Self::Glyph {
            shortcode: shortcode.into(),
            glyph,
        }
    }

    #[inline]
    pub fn shortcode(&self) -> &str {
        match self {
            Self::Remote { shortcode, .. }
            | Self::Image { shortcode, .. }
            | Self::Glyph { shortcode, .. } => shortcode,
        }
    }
}

impl Debug for Emoji {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote { shortcode, url } => f
                .debug_struct("Remote")
                .field("shortcode", shortcode)
                .field("url", url)
                .finish(),
            Self::Image { shortcode, image } => f
                .debug_struct("Image")
                .field("shortcode", shortcode)
                .field("size", &image.size)
                .finish(),
            Self::Glyph { shortcode, glyph } => f
                .debug_struct("Glyph")
                .field("shortcode", shortcode)
                .field("glyph", glyph)
                .finish(),
        }
    }
}

impl Hash for Emoji {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Remote { shortcode, url } => {
                0_u8.hash(state);
                shortcode.hash(state);
                url.hash(state);
            }
            Self::Image { shortcode, image } => {
                1_u8.hash(state);
                shortcode.hash(state);
                // Two clones of the same `Arc` hash equal; re-decoding an image
                // counts as new content.
                Arc::as_ptr(image).hash(state);
            }
            Self::Glyph { shortcode, glyph } => {
                2_u8.hash(state);
                shortcode.hash(state);
                glyph.hash(state);
            }
        }
    }
}
