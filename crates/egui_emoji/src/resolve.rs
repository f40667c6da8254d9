use std::sync::Arc;

use egui::ahash::{HashMap, HashSet};
use egui::load::{ImagePoll, LoadError, SizeHint, SizedTexture};
use egui::mutex::Mutex;
use egui::{ColorImage, Context, Id, TextStyle, TextureHandle, TextureOptions, Ui, Vec2};

use crate::Emoji;
use crate::load::active_loader;

/// What a resolved emoji looks like on screen.
#[derive(Clone, Debug, PartialEq)]
pub enum EmojiVisual {
    /// A texture, painted over the text run.
    Texture(SizedTexture),

    /// A glyph from the installed fonts.
    Glyph(char),
}

/// One emoji resolved for display.
///
/// Derived, never persisted: the shortcode → [`ResolvedEmoji`] map is rebuilt
/// wholesale on every render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedEmoji {
    pub visual: EmojiVisual,

    /// Size in ui points.
    pub size: Vec2,

    /// Vertical offset applied when painting a texture visual,
    /// in ui points. Positive moves the visual down.
    pub baseline_offset: f32,
}

pub(crate) struct ResolveOptions {
    pub size: Option<Vec2>,
    pub baseline_offset: Option<f32>,
    pub placeholder: EmojiVisual,
}

/// Build the shortcode → visual map for one render pass.
///
/// Glyph and image emoji resolve immediately. Remote emoji poll the installed
/// loader: while pending they resolve to the placeholder visual, and on
/// failure they get *no* entry, so their occurrences in the text stay literal.
///
/// The map keys are always a subset of the shortcodes in `emojis`, and
/// resolving twice with unchanged inputs yields an identical map.
pub(crate) fn resolve(
    ui: &Ui,
    emojis: &[Emoji],
    options: &ResolveOptions,
) -> HashMap<String, ResolvedEmoji> {
    let ctx = ui.ctx();

    let row_height = ui.text_style_height(&TextStyle::Body);
    let size = options.size.unwrap_or_else(|| Vec2::splat(row_height));
    let baseline_offset = options
        .baseline_offset
        .unwrap_or((row_height - size.y) * 0.5);

    let loader = active_loader(ctx);

    let mut resolved = HashMap::default();
    for emoji in emojis {
        let visual = match emoji {
            Emoji::Glyph { glyph, .. } => Some(EmojiVisual::Glyph(*glyph)),

            Emoji::Image { shortcode, image } => {
                Some(EmojiVisual::Texture(texture_for(ctx, shortcode, image)))
            }

            Emoji::Remote { shortcode, url } => {
                let size_hint = SizeHint::Height((size.y * ctx.pixels_per_point()).round() as u32);
                match loader.load(ctx, url, size_hint) {
                    Ok(ImagePoll::Ready { image }) => {
                        Some(EmojiVisual::Texture(texture_for(ctx, shortcode, &image)))
                    }
                    Ok(ImagePoll::Pending { .. }) => Some(options.placeholder.clone()),
                    Err(err) => {
                        warn_once(ctx, url, &err);
                        None
                    }
                }
            }
        };

        if let Some(visual) = visual {
            resolved.insert(
                emoji.shortcode().to_owned(),
                ResolvedEmoji {
                    visual,
                    size,
                    baseline_offset,
                },
            );
        }
    }
    resolved
}

/// Textures uploaded for decoded emoji images, keyed by allocation identity.
///
/// Lives in [`Context`] data so each image is uploaded at most once, no matter
/// how many frames or widgets show it.
#[derive(Clone, Default)]
struct TextureStore(Arc<Mutex<HashMap<usize, TextureHandle>>>);

fn texture_for(ctx: &Context, shortcode: &str, image: &Arc<ColorImage>) -> SizedTexture {
    let store = ctx.data_mut(|d| {
        d.get_temp_mut_or_default::<TextureStore>(Id::new("egui_emoji::textures"))
            .clone()
    });
    let mut textures = store.0.lock();
    let handle = textures.entry(Arc::as_ptr(image) as usize).or_insert_with(|| {
        ctx.load_texture(
            format!("emoji:{shortcode}"),
            image.as_ref().clone(),
            TextureOptions::LINEAR,
        )
    });
    SizedTexture::from_handle(handle)
}

#[derive(Clone, Default)]
struct WarnedUrls(Arc<Mutex<HashSet<String>>>);

/// Log each url's failure once, not once per frame.
fn warn_once(ctx: &Context, url: &str, err: &LoadError) {
    let warned = ctx.data_mut(|d| {
        d.get_temp_mut_or_default::<WarnedUrls>(Id::new("egui_emoji::warned"))
            .clone()
    });
    if warned.0.lock().insert(url.to_owned()) {
        log::warn!("failed to load emoji image {url:?}: {err}");
    }
}
