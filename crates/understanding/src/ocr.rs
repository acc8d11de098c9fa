//! Optical character recognition over captured screenshots.
//!
//! Runs the Tesseract engine through rusty_tesseract with the default "eng"
//! language model. A corrupt image or a missing engine surfaces as an OCR
//! error for the driver to propagate.

use std::path::Path;

use rusty_tesseract::{Args, Image};
use tracing::debug;

use shotwire_core::ShotError;

/// Run OCR on the image at `path` and return the recognized text.
///
/// The result may be empty or whitespace-only when the image contains no
/// readable text; see [`is_blank`].
pub fn extract_text(path: &Path) -> Result<String, ShotError> {
    let decoded = image::open(path).map_err(|e| ShotError::Ocr(e.to_string()))?;
    let image = Image::from_dynamic_image(&decoded).map_err(|e| ShotError::Ocr(e.to_string()))?;

    let args = Args {
        lang: "eng".to_string(),
        ..Args::default()
    };
    let text =
        rusty_tesseract::image_to_string(&image, &args).map_err(|e| ShotError::Ocr(e.to_string()))?;

    debug!(chars = text.len(), "ocr complete");
    Ok(text)
}

/// Whitespace-only text counts as "no text found" and routes the run to the
/// vision branch.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("   \n\t  "));
        assert!(!is_blank("Which of the following?"));
        assert!(!is_blank("  x  "));
    }
}
