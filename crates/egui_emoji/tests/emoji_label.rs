use std::sync::Arc;

use egui::load::{ImageLoadResult, ImagePoll, LoadError, SizeHint};
use egui::mutex::Mutex;
use egui::{ColorImage, Context};
use egui_emoji::{Emoji, EmojiImageLoader, EmojiLabel, install_loader};
use egui_kittest::Harness;
use egui_kittest::kittest::Queryable;

fn test_image() -> Arc<ColorImage> {
    Arc::new(ColorImage::from_rgba_unmultiplied([2, 2], &[255; 16]))
}

/// Serves scripted results; urls without a script entry stay pending.
#[derive(Default)]
struct ScriptedLoader {
    results: Mutex<egui::ahash::HashMap<String, Result<Arc<ColorImage>, String>>>,
}

impl ScriptedLoader {
    fn set(&self, url: &str, result: Result<Arc<ColorImage>, String>) {
        self.results.lock().insert(url.to_owned(), result);
    }
}

impl EmojiImageLoader for ScriptedLoader {
    fn id(&self) -> &str {
        "egui_emoji::tests::ScriptedLoader"
    }

    fn load(&self, _: &Context, url: &str, _: SizeHint) -> ImageLoadResult {
        match self.results.lock().get(url).cloned() {
            Some(Ok(image)) => Ok(ImagePoll::Ready { image }),
            Some(Err(err)) => Err(LoadError::Loading(err)),
            None => Ok(ImagePoll::Pending { size: None }),
        }
    }
}

fn harness_with_loader(
    loader: Arc<ScriptedLoader>,
    label: impl Fn() -> EmojiLabel + 'static,
) -> Harness<'static> {
    Harness::new_ui(move |ui| {
        install_loader(ui.ctx(), loader.clone());
        ui.add(label());
    })
}

#[test]
fn local_emoji_resolve_without_a_loader() {
    let mut harness = Harness::new_ui(|ui| {
        ui.add(EmojiLabel::new(
            "Hi :wave: :dot:",
            vec![
                Emoji::glyph("wave", '👋'),
                Emoji::image("dot", test_image()),
            ],
        ));
    });
    harness.run();

    assert!(harness.query_by_label("Hi ").is_some());
    assert!(harness.query_by_label("👋").is_some());
    // The image run is labeled with its shortcode.
    assert!(harness.query_by_label("dot").is_some());
    // No literal shortcode text remains.
    assert!(harness.query_by_label(":wave:").is_none());
    assert!(harness.query_by_label(":dot:").is_none());
}

#[test]
fn failed_remote_emoji_fall_back_to_literal_text() {
    let loader = Arc::new(ScriptedLoader::default());
    loader.set("https://example.com/b.png", Err("404 Not Found".to_owned()));

    let mut harness = harness_with_loader(loader, || {
        EmojiLabel::new(
            "Hi :a: :b:",
            vec![
                Emoji::glyph("a", '✅'),
                Emoji::remote("b", "https://example.com/b.png"),
            ],
        )
    });
    harness.run();

    assert!(harness.query_by_label("Hi ").is_some());
    assert!(harness.query_by_label("✅").is_some());
    assert!(harness.query_by_label(" :b:").is_some());
}

#[test]
fn remote_emoji_show_a_placeholder_then_resolve() {
    let loader = Arc::new(ScriptedLoader::default());

    let mut harness = harness_with_loader(loader.clone(), || {
        EmojiLabel::new(
            "Hi :b:",
            vec![Emoji::remote("b", "https://example.com/b.png")],
        )
    });
    harness.run();

    // Still loading: the placeholder glyph is shown, not the image.
    assert!(harness.query_by_label("🖼").is_some());
    assert!(harness.query_by_label("b").is_none());

    loader.set("https://example.com/b.png", Ok(test_image()));
    harness.run();

    assert!(harness.query_by_label("b").is_some());
    assert!(harness.query_by_label("🖼").is_none());
}

#[test]
fn unknown_shortcodes_stay_literal() {
    let mut harness = Harness::new_ui(|ui| {
        ui.add(EmojiLabel::new(
            "Hi :unknown:",
            vec![Emoji::glyph("a", '✅')],
        ));
    });
    harness.run();

    assert!(harness.query_by_label("Hi :unknown:").is_some());
}

#[test]
fn no_emoji_shows_the_text_directly() {
    let mut harness = Harness::new_ui(|ui| {
        ui.add(EmojiLabel::new("just text :a:", vec![]));
    });
    harness.run();

    assert!(harness.query_by_label("just text :a:").is_some());
}

#[test]
fn prepend_and_append_bracket_the_sequence() {
    let mut harness = Harness::new_ui(|ui| {
        ui.add(
            EmojiLabel::new("Hi :a:", vec![Emoji::glyph("a", '✅')])
                .prepend("<< ")
                .append(" >>"),
        );
    });
    harness.run();

    assert!(harness.query_by_label("<< ").is_some());
    assert!(harness.query_by_label("Hi ").is_some());
    assert!(harness.query_by_label("✅").is_some());
    assert!(harness.query_by_label(" >>").is_some());
}

#[test]
fn placeholder_glyph_can_be_overridden() {
    let loader = Arc::new(ScriptedLoader::default());

    let mut harness = harness_with_loader(loader, || {
        EmojiLabel::new(
            ":b: incoming",
            vec![Emoji::remote("b", "https://example.com/b.png")],
        )
        .placeholder_glyph('⏳')
    });
    harness.run();

    assert!(harness.query_by_label("⏳").is_some());
    assert!(harness.query_by_label("🖼").is_none());
}
