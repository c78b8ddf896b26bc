use std::sync::mpsc::{self, TryRecvError};

use tracing::{info, warn};

use crate::consts::LOADER_THREAD_NAME;
use crate::error::{CropperError, Result};
use crate::io::source::{ImageSource, LoadedImage};

/// Decode `source` on a background thread.
///
/// The returned handle delivers exactly one result. Dropping it discards the
/// result once the decode finishes.
pub fn spawn_load(source: ImageSource) -> Result<PendingImage> {
    let (tx, rx) = mpsc::channel();
    let origin = source.origin();

    std::thread::Builder::new()
        .name(LOADER_THREAD_NAME.into())
        .spawn(move || {
            let result = source.decode();
            match &result {
                Ok(img) => info!(
                    origin = %img.origin(),
                    width = img.width(),
                    height = img.height(),
                    "Image decoded"
                ),
                Err(e) => warn!(error = %e, "Image decode failed"),
            }
            let _ = tx.send(result);
        })?;

    Ok(PendingImage { origin, rx })
}

/// One-shot "image ready" notification.
#[derive(Debug)]
pub struct PendingImage {
    origin: String,
    rx: mpsc::Receiver<Result<LoadedImage>>,
}

impl PendingImage {
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Non-blocking check. `None` while the decode is still running.
    pub fn try_ready(&self) -> Option<Result<LoadedImage>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(CropperError::LoaderDisconnected)),
        }
    }

    /// Block until the decode finishes.
    pub fn wait(self) -> Result<LoadedImage> {
        self.rx
            .recv()
            .map_err(|_| CropperError::LoaderDisconnected)?
    }
}
