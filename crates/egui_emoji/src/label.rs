use egui::ahash::HashMap;
use egui::load::SizedTexture;
use egui::{
    Color32, Id, Rect, Response, RichText, Sense, Ui, Vec2, Widget, WidgetInfo, WidgetType, pos2,
    vec2,
};

use crate::Emoji;
use crate::resolve::{EmojiVisual, ResolveOptions, ResolvedEmoji, resolve};
use crate::text::{Run, mark_resolved, runs};

/// Text with inline custom emoji.
///
/// Every `:shortcode:` in the text that matches one of the given [`Emoji`]
/// descriptors is replaced by its visual; everything else is shown as plain
/// text. Shortcodes without a descriptor, and remote emoji whose image failed
/// to load, stay literal.
///
/// ```
/// # egui::__run_test_ui(|ui| {
/// use egui_emoji::{Emoji, EmojiLabel};
///
/// ui.add(
///     EmojiLabel::new(
///         "nice work :ferris: :tada:",
///         vec![
///             Emoji::remote("ferris", "https://example.com/ferris.png"),
///             Emoji::glyph("tada", '🎉'),
///         ],
///     )
///     .strong(true),
/// );
/// # });
/// ```
///
/// Remote emoji show a placeholder while loading; see [`crate::load`] for how
/// their images are fetched.
#[must_use = "You should put this widget in a ui with `ui.add(widget);`"]
pub struct EmojiLabel {
    text: String,
    emojis: Vec<Emoji>,
    strong: bool,
    prepend: Option<RichText>,
    append: Option<RichText>,
    emoji_size: Option<Vec2>,
    baseline_offset: Option<f32>,
    placeholder: EmojiVisual,
}

impl EmojiLabel {
    /// The raw text plus the emoji it may refer to.
    pub fn new(text: impl Into<String>, emojis: impl IntoIterator<Item = Emoji>) -> Self {
        Self {
            text: text.into(),
            emojis: emojis.into_iter().collect(),
            strong: false,
            prepend: None,
            append: None,
            emoji_size: None,
            baseline_offset: None,
            placeholder: EmojiVisual::Glyph('🖼'),
        }
    }

    /// Show the text runs in a strong (bold) font.
    #[inline]
    pub fn strong(mut self, strong: bool) -> Self {
        self.strong = strong;
        self
    }

    /// Extra text run shown before everything else.
    #[inline]
    pub fn prepend(mut self, text: impl Into<RichText>) -> Self {
        self.prepend = Some(text.into());
        self
    }

    /// Extra text run shown after everything else.
    #[inline]
    pub fn append(mut self, text: impl Into<RichText>) -> Self {
        self.append = Some(text.into());
        self
    }

    /// Target size of each emoji visual.
    ///
    /// Defaults to a square with the body font's row height, so emoji line up
    /// with the surrounding text.
    #[inline]
    pub fn emoji_size(mut self, size: impl Into<Vec2>) -> Self {
        self.emoji_size = Some(size.into());
        self
    }

    /// Vertical offset applied to texture visuals, in ui points.
    /// Positive moves them down.
    ///
    /// Defaults to centering the visual on the text row.
    #[inline]
    pub fn baseline_offset(mut self, offset: f32) -> Self {
        self.baseline_offset = Some(offset);
        self
    }

    /// Glyph shown while a remote emoji is still loading. Defaults to `🖼`.
    #[inline]
    pub fn placeholder_glyph(mut self, glyph: char) -> Self {
        self.placeholder = EmojiVisual::Glyph(glyph);
        self
    }

    /// Texture shown while a remote emoji is still loading,
    /// instead of the placeholder glyph.
    #[inline]
    pub fn placeholder_texture(mut self, texture: impl Into<SizedTexture>) -> Self {
        self.placeholder = EmojiVisual::Texture(texture.into());
        self
    }

    /// Hash of the raw text and the ordered emoji list.
    ///
    /// Changes if and only if the widget's content changes. It seeds the
    /// widget's [`Id`], so egui-side state (and anything keyed on it) is
    /// dropped and rebuilt when the content does change.
    pub fn content_identity(&self) -> u64 {
        Id::new((&self.text, &self.emojis)).value()
    }

    /// Resolve the emoji into the shortcode → visual map used for rendering.
    ///
    /// Rebuilt on every render pass; see [`ResolvedEmoji`].
    pub fn resolve(&self, ui: &Ui) -> HashMap<String, ResolvedEmoji> {
        resolve(
            ui,
            &self.emojis,
            &ResolveOptions {
                size: self.emoji_size,
                baseline_offset: self.baseline_offset,
                placeholder: self.placeholder.clone(),
            },
        )
    }

    fn text_run(&self, text: &str) -> RichText {
        let text = RichText::new(text);
        if self.strong { text.strong() } else { text }
    }
}

impl Widget for EmojiLabel {
    fn ui(self, ui: &mut Ui) -> Response {
        let identity = self.content_identity();
        ui.push_id(identity, |ui| {
            let resolved = if self.emojis.is_empty() {
                HashMap::default()
            } else {
                self.resolve(ui)
            };

            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;

                if let Some(prepend) = self.prepend.clone() {
                    ui.label(prepend);
                }

                if resolved.is_empty() {
                    // Nothing to substitute; show the text directly.
                    if !self.text.is_empty() {
                        ui.label(self.text_run(&self.text));
                    }
                } else {
                    let marked =
                        mark_resolved(&self.text, |shortcode| resolved.contains_key(shortcode));
                    for run in runs(&marked) {
                        match run {
                            Run::Text(text) => {
                                ui.label(self.text_run(text));
                            }
                            Run::Emoji(shortcode) => match resolved.get(shortcode) {
                                Some(emoji) => {
                                    emoji_run(ui, shortcode, emoji);
                                }
                                None => {
                                    ui.label(self.text_run(&format!(":{shortcode}:")));
                                }
                            },
                        }
                    }
                }

                if let Some(append) = self.append.clone() {
                    ui.label(append);
                }
            })
            .response
        })
        .inner
    }
}

fn emoji_run(ui: &mut Ui, shortcode: &str, emoji: &ResolvedEmoji) -> Response {
    match &emoji.visual {
        EmojiVisual::Glyph(glyph) => ui.label(RichText::new(glyph.to_string()).size(emoji.size.y)),

        EmojiVisual::Texture(texture) => {
            let (rect, response) = ui.allocate_exact_size(emoji.size, Sense::hover());
            response.widget_info(|| {
                WidgetInfo::labeled(WidgetType::Image, ui.is_enabled(), shortcode)
            });
            if ui.is_rect_visible(rect) {
                let rect = rect.translate(vec2(0.0, emoji.baseline_offset));
                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                ui.painter().image(texture.id, rect, uv, Color32::WHITE);
            }
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Emoji, EmojiLabel};

    #[test]
    fn content_identity_tracks_text_and_emojis() {
        let a = EmojiLabel::new("Hi :a:", vec![Emoji::glyph("a", '✅')]);
        let b = EmojiLabel::new("Hi :a:", vec![Emoji::glyph("a", '✅')]);
        assert_eq!(a.content_identity(), b.content_identity());

        let other_text = EmojiLabel::new("Yo :a:", vec![Emoji::glyph("a", '✅')]);
        assert_ne!(a.content_identity(), other_text.content_identity());

        let other_emoji = EmojiLabel::new("Hi :a:", vec![Emoji::glyph("a", '❌')]);
        assert_ne!(a.content_identity(), other_emoji.content_identity());

        let no_emoji = EmojiLabel::new("Hi :a:", vec![]);
        assert_ne!(a.content_identity(), no_emoji.content_identity());
    }
}
