//! Ready-made [`EmojiImageLoader`](crate::load::EmojiImageLoader) implementations.

mod ehttp_loader;

pub use self::ehttp_loader::EhttpLoader;

/// Install an [`EhttpLoader`], enabling remote emoji over `http(s)://`.
///
/// Call this once in your app's setup code.
pub fn install(ctx: &egui::Context) {
    crate::load::install_loader(ctx, std::sync::Arc::new(EhttpLoader::default()));
}
