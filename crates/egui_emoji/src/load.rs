//! # Emoji image loading
//!
//! [`crate::EmojiLabel`] never fetches anything itself. Every
//! [`crate::Emoji::Remote`] descriptor is resolved through a single
//! [`EmojiImageLoader`] installed on the [`Context`] with [`install_loader`],
//! the same environment-style injection egui uses for its own
//! [image loaders](egui::load).
//!
//! With no loader installed, remote emoji fail with
//! [`LoadError::NoImageLoaders`](egui::load::LoadError::NoImageLoaders) and
//! fall back to their literal `:shortcode:` text. This is deliberate: the
//! crate imposes no network stack, no cache policy and no timeout; the
//! embedding application supplies all of that in its loader. With the `http`
//! feature, [`crate::loaders::EhttpLoader`] is a reasonable default.

use std::sync::Arc;

use egui::load::{ImageLoadResult, LoadError, SizeHint};
use egui::{Context, Id};

/// A loader capable of turning an emoji image url into a decoded image.
///
/// This is the emoji counterpart of [`egui::load::ImageLoader`], with the same
/// poll-based contract: [`load`](Self::load) is called every frame the emoji
/// is visible, so implementations start their fetch on the first call, return
/// [`ImagePoll::Pending`](egui::load::ImagePoll::Pending) while it is in
/// flight, and cache the outcome (including the returned allocation) so that
/// polling is immediate-mode safe.
pub trait EmojiImageLoader {
    /// Unique ID of this loader.
    ///
    /// To reduce the chance of collisions, use [`egui::generate_loader_id`] for this.
    fn id(&self) -> &str;

    /// Try loading the image from the given url.
    ///
    /// Implementations should call [`Context::request_repaint`] to wake up the
    /// ui once the image is ready.
    ///
    /// # Errors
    /// This may fail with:
    /// - [`LoadError::NotSupported`] if the loader does not support loading `url`.
    /// - [`LoadError::Loading`](egui::load::LoadError::Loading) if the fetch or decode failed.
    fn load(&self, ctx: &Context, url: &str, size_hint: SizeHint) -> ImageLoadResult;

    /// Forget the given `url`.
    ///
    /// If `url` is cached, it should be evicted from cache,
    /// so that it may be fully reloaded.
    fn forget(&self, url: &str) {
        let _ = url;
    }

    /// Forget all urls ever given to this loader.
    fn forget_all(&self) {}
}

/// The loader in effect when none has been installed.
///
/// It rejects every url, so all remote emoji degrade to literal
/// `:shortcode:` text until the application calls [`install_loader`].
#[derive(Default)]
pub struct DefaultEmojiLoader;

impl EmojiImageLoader for DefaultEmojiLoader {
    fn id(&self) -> &str {
        egui::generate_loader_id!(DefaultEmojiLoader)
    }

    fn load(&self, _: &Context, _: &str, _: SizeHint) -> ImageLoadResult {
        Err(LoadError::NoImageLoaders)
    }
}

#[derive(Clone)]
struct InstalledLoader(Arc<dyn EmojiImageLoader + Send + Sync>);

fn loader_id() -> Id {
    Id::new("egui_emoji::loader")
}

/// Install the loader used for every [`crate::Emoji::Remote`] emoji.
///
/// The loader is stored in the [`Context`], so calling this once during app
/// setup is enough. Installing a new loader replaces the previous one.
///
/// ```
/// # egui::__run_test_ctx(|ctx| {
/// # let my_loader = std::sync::Arc::new(egui_emoji::load::DefaultEmojiLoader);
/// egui_emoji::install_loader(ctx, my_loader);
/// # });
/// ```
pub fn install_loader(ctx: &Context, loader: Arc<dyn EmojiImageLoader + Send + Sync>) {
    ctx.data_mut(|d| d.insert_temp(loader_id(), InstalledLoader(loader)));
}

/// The installed loader, or [`DefaultEmojiLoader`] if there is none.
pub(crate) fn active_loader(ctx: &Context) -> Arc<dyn EmojiImageLoader + Send + Sync> {
    match ctx.data(|d| d.get_temp::<InstalledLoader>(loader_id())) {
        Some(installed) => installed.0,
        None => Arc::new(DefaultEmojiLoader),
    }
}
