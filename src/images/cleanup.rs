//! Removal of embed temp files after a send

use std::io::ErrorKind;

use tracing::{debug, warn};

use super::embed::EmbeddedImages;

/// Delete the temp file of every embed and clear the list
///
/// Never fails: a file that is already gone is fine, any other delete error
/// is logged and skipped. Calling it again is a no-op.
pub fn cleanup(embeds: &mut EmbeddedImages) {
    for image in embeds.take_all() {
        match std::fs::remove_file(&image.temp_file_path) {
            Ok(()) => debug!("Removed embed temp file: {}", image.temp_file_path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Embed temp file already gone: {}", image.temp_file_path.display());
            }
            Err(e) => warn!(
                "Failed to remove embed temp file {}: {e}",
                image.temp_file_path.display()
            ),
        }
    }
}
