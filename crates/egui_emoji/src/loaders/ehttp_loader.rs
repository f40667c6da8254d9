use std::{sync::Arc, task::Poll};

use egui::ahash::HashMap;
use egui::load::{ImageLoadResult, ImagePoll, LoadError, SizeHint};
use egui::mutex::Mutex;
use egui::{ColorImage, Context};

use crate::load::EmojiImageLoader;

type Entry = Poll<Result<Arc<ColorImage>, String>>;

/// Fetches emoji images over `http(s)://` with [`ehttp`] and decodes them
/// with the [`image`] crate.
///
/// Each url is fetched at most once; the outcome, success or failure, is
/// cached for the lifetime of the loader.
#[derive(Default)]
pub struct EhttpLoader {
    cache: Arc<Mutex<HashMap<String, Entry>>>,
}

const PROTOCOLS: &[&str] = &["http://", "https://"];

fn decode_image_bytes(url: &str, bytes: &[u8]) -> Result<Arc<ColorImage>, String> {
    let image =
        image::load_from_memory(bytes).map_err(|err| format!("failed to decode {url:?}: {err}"))?;
    let size = [image.width() as usize, image.height() as usize];
    let image_buffer = image.to_rgba8();
    let pixels = image_buffer.as_flat_samples();
    Ok(Arc::new(ColorImage::from_rgba_unmultiplied(
        size,
        pixels.as_slice(),
    )))
}

fn decode_response(
    url: &str,
    response: Result<ehttp::Response, String>,
) -> Result<Arc<ColorImage>, String> {
    let response = response?;
    if !response.ok {
        return Err(format!(
            "failed to load {url:?}: {} {}",
            response.status, response.status_text
        ));
    }
    decode_image_bytes(url, &response.bytes)
}

impl EmojiImageLoader for EhttpLoader {
    fn id(&self) -> &str {
        egui::generate_loader_id!(EhttpLoader)
    }

    fn load(&self, ctx: &Context, url: &str, _: SizeHint) -> ImageLoadResult {
        if !PROTOCOLS.iter().any(|protocol| url.starts_with(protocol)) {
            return Err(LoadError::NotSupported);
        }

        let mut cache = self.cache.lock();
        if let Some(entry) = cache.get(url).cloned() {
            match entry {
                Poll::Ready(Ok(image)) => Ok(ImagePoll::Ready { image }),
                Poll::Ready(Err(err)) => Err(LoadError::Loading(err)),
                Poll::Pending => Ok(ImagePoll::Pending { size: None }),
            }
        } else {
            log::trace!("started loading {url:?}");

            let url = url.to_owned();
            cache.insert(url.clone(), Poll::Pending);
            drop(cache);

            ehttp::fetch(ehttp::Request::get(&url), {
                let ctx = ctx.clone();
                let cache = self.cache.clone();
                move |response| {
                    let result = decode_response(&url, response);
                    log::trace!("finished loading {url:?}");
                    cache.lock().insert(url, Poll::Ready(result));
                    ctx.request_repaint();
                }
            });

            Ok(ImagePoll::Pending { size: None })
        }
    }

    fn forget(&self, url: &str) {
        let _ = self.cache.lock().remove(url);
    }

    fn forget_all(&self) {
        self.cache.lock().clear();
    }
}
