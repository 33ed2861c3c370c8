//! Asynchronous image asset loading.
//!
//! Textures load on background threads so the window opens immediately. The
//! caller polls a [`TextureSlot`] each frame and swaps in the decoded
//! texture, or a fallback, once the load settles.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

use log::debug;

use crate::error::{Error, Result};
use crate::texture::Texture;

/// Shared landing place for a texture load in flight.
///
/// Starts empty; the loader thread fills it exactly once with either the
/// decoded texture or the load error.
#[derive(Clone)]
pub struct TextureSlot {
    result: Arc<Mutex<Option<Result<Texture>>>>,
}

impl TextureSlot {
    /// Takes the settled result out of the slot if the load has finished.
    ///
    /// Returns `None` while the load is still in flight, and again forever
    /// after the result was taken. A poisoned mutex is treated as still
    /// pending; the loader thread never panics while holding the lock.
    pub fn poll(&self) -> Option<Result<Texture>> {
        match self.result.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        }
    }
}

/// Starts decoding an image file into an RGBA8 texture on a background
/// thread.
pub fn load_texture<P: AsRef<Path>>(path: P) -> TextureSlot {
    let path = path.as_ref().to_owned();
    let slot = TextureSlot {
        result: Arc::new(Mutex::new(None)),
    };

    let result = Arc::clone(&slot.result);
    thread::spawn(move || {
        let outcome = decode(&path);
        debug!(
            "texture load {:?}: {}",
            path,
            if outcome.is_ok() { "ok" } else { "failed" },
        );
        if let Ok(mut slot) = result.lock() {
            *slot = Some(outcome);
        }
    });

    slot
}

/// Applies a settled load exactly once, then drops the slot.
///
/// Call this every frame: it does nothing while the load is still in
/// flight, and nothing ever again after `apply` ran.
pub fn poll_slot(slot: &mut Option<TextureSlot>, apply: impl FnOnce(Result<Texture>)) {
    if let Some(pending) = slot {
        if let Some(result) = pending.poll() {
            apply(result);
            *slot = None;
        }
    }
}

fn decode(path: &Path) -> Result<Texture> {
    let image = image::open(path).map_err(Error::from)?.to_rgba8();
    let (width, height) = image.dimensions();
    Texture::new(image.into_raw(), width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn settle(slot: &TextureSlot) -> Result<Texture> {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(outcome) = slot.poll() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "texture load never settled");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn missing_file_settles_with_error() {
        let slot = load_texture("no/such/texture.png");
        assert!(settle(&slot).is_err());
        // The result can only be taken once.
        assert!(slot.poll().is_none());
    }

    #[test]
    fn poll_slot_applies_a_settled_result_once() {
        let texture = Texture::new(vec![0; 4], 1, 1).unwrap();
        let mut slot = Some(TextureSlot {
            result: Arc::new(Mutex::new(Some(Ok(texture)))),
        });

        let mut applied = 0;
        poll_slot(&mut slot, |result| {
            assert!(result.is_ok());
            applied += 1;
        });
        assert_eq!(applied, 1);
        assert!(slot.is_none());

        poll_slot(&mut slot, |_| applied += 1);
        assert_eq!(applied, 1);
    }

    #[test]
    fn poll_slot_leaves_pending_loads_alone() {
        let mut slot = Some(TextureSlot {
            result: Arc::new(Mutex::new(None)),
        });

        let mut applied = 0;
        poll_slot(&mut slot, |_| applied += 1);
        assert_eq!(applied, 0);
        assert!(slot.is_some());
    }

    #[test]
    fn png_round_trip() {
        let dir = std::env::temp_dir().join("horloge-asset-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("checker.png");

        let image = image::RgbaImage::from_fn(2, 2, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgba([255, 255, 255, 255])
            } else {
                image::Rgba([0, 0, 0, 255])
            }
        });
        image.save(&path).unwrap();

        let texture = settle(&load_texture(&path)).unwrap();
        assert_eq!(texture.width(), 2);
        assert_eq!(texture.height(), 2);
        assert_eq!(&texture.pixels()[0..4], &[255, 255, 255, 255]);
        assert_eq!(&texture.pixels()[4..8], &[0, 0, 0, 255]);
    }
}
