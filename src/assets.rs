//! Sprite loading
//!
//! Images load in the background. Until one is usable (or forever, if it
//! fails) the renderer draws the sprite's fallback shape instead.

use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

use crate::renderer::SpriteId;

/// One `HtmlImageElement` per sprite, `None` if the element could not be created
pub struct Sprites {
    images: [Option<HtmlImageElement>; 4],
}

impl Sprites {
    /// Start loading every sprite
    pub fn load() -> Self {
        Self {
            images: SpriteId::ALL.map(load_image),
        }
    }

    /// The image for `id`, only once it has fully decoded
    pub fn ready(&self, id: SpriteId) -> Option<&HtmlImageElement> {
        let idx = SpriteId::ALL.iter().position(|s| *s == id)?;
        self.images[idx]
            .as_ref()
            .filter(|img| img.complete() && img.natural_width() > 0)
    }
}

fn load_image(id: SpriteId) -> Option<HtmlImageElement> {
    let img = match HtmlImageElement::new() {
        Ok(img) => img,
        Err(e) => {
            log::warn!("Cannot create image for {:?}: {:?}", id, e);
            return None;
        }
    };

    let path = id.path();
    let onerror = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        log::warn!("Failed to load {}, using fallback shape", path);
    });
    img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    img.set_src(path);
    log::debug!("Loading sprite {:?} from {}", id, path);
    Some(img)
}
