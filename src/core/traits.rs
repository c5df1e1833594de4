//! Trait definitions for external collaborators.
//!
//! Text recognition is not implemented by this crate. Callers plug in an OCR
//! backend through [`TextRecognizer`]; the analysis engine only ever sees the
//! best-effort string it produces.

use image::GrayImage;
use std::fmt::Debug;
use tracing::warn;

use crate::core::errors::RecognitionUnavailable;

/// Best-effort text recognition over a prepared (binarised) region.
///
/// Implementors provide [`TextRecognizer::try_recognize`]. The analysis engine
/// calls [`TextRecognizer::recognize`], which never fails: an unavailable
/// backend yields an empty string.
pub trait TextRecognizer: Send + Sync + Debug {
    /// Runs the backend over `region`.
    fn try_recognize(&self, region: &GrayImage) -> Result<String, RecognitionUnavailable>;

    /// Recognizes text in `region`, mapping any failure to `""`.
    fn recognize(&self, region: &GrayImage) -> String {
        match self.try_recognize(region) {
            Ok(text) => text.trim().to_string(),
            Err(err) => {
                warn!("{err}; continuing without text");
                String::new()
            }
        }
    }
}

/// A recognizer for deployments without an OCR backend.
///
/// Always yields empty text, so classification falls back to geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecognizer;

impl TextRecognizer for NoopRecognizer {
    fn try_recognize(&self, _region: &GrayImage) -> Result<String, RecognitionUnavailable> {
        Ok(String::new())
    }
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for std::sync::Arc<T> {
    fn try_recognize(&self, region: &GrayImage) -> Result<String, RecognitionUnavailable> {
        (**self).try_recognize(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FailingRecognizer;

    impl TextRecognizer for FailingRecognizer {
        fn try_recognize(&self, _region: &GrayImage) -> Result<String, RecognitionUnavailable> {
            Err(RecognitionUnavailable::new("tesseract not installed"))
        }
    }

    #[derive(Debug)]
    struct PaddedRecognizer;

    impl TextRecognizer for PaddedRecognizer {
        fn try_recognize(&self, _region: &GrayImage) -> Result<String, RecognitionUnavailable> {
            Ok("  Sign in \n".to_string())
        }
    }

    #[test]
    fn test_failures_become_empty_text() {
        let region = GrayImage::new(8, 8);
        assert_eq!(FailingRecognizer.recognize(&region), "");
        assert_eq!(NoopRecognizer.recognize(&region), "");
    }

    #[test]
    fn test_recognized_text_is_trimmed() {
        let region = GrayImage::new(8, 8);
        assert_eq!(PaddedRecognizer.recognize(&region), "Sign in");
        let shared = std::sync::Arc::new(PaddedRecognizer);
        assert_eq!(shared.recognize(&region), "Sign in");
    }
}
