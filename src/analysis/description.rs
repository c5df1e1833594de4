//! Human-readable screenshot descriptions.

use std::path::Path;

use crate::domain::UIElement;

/// File-level facts about an analysed capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureInfo {
    pub file_name: String,
    pub size_bytes: u64,
    /// Lowercased extension including the dot, or empty.
    pub extension: String,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

impl CaptureInfo {
    /// Derives the file name and extension from `path`.
    pub fn from_path(path: &Path, size_bytes: u64, dimensions: (u32, u32), channels: u8) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        Self {
            file_name,
            size_bytes,
            extension,
            width: dimensions.0,
            height: dimensions.1,
            channels,
        }
    }
}

/// Builds the description of a capture.
///
/// At most `element_limit` elements are listed; the remainder is summarised
/// in a trailing count.
pub fn describe_screenshot(
    info: &CaptureInfo,
    recognized_text: &str,
    elements: &[UIElement],
    element_limit: usize,
) -> String {
    let mut description = format!(
        "Screenshot file: {}, size: {} bytes, type: {}, dimensions: {}x{} pixels, {} channels",
        info.file_name, info.size_bytes, info.extension, info.width, info.height, info.channels
    );

    if !recognized_text.is_empty() {
        description.push_str(&format!("\n\nExtracted text:\n{recognized_text}"));
    }

    if !elements.is_empty() {
        description.push_str("\n\nDetected UI elements:");
        for element in elements.iter().take(element_limit) {
            description.push_str(&format!(
                "\n- {}: {}",
                element.element_type, element.description
            ));
        }
        if elements.len() > element_limit {
            description.push_str(&format!(
                "\n... and {} more elements",
                elements.len() - element_limit
            ));
        }
    }

    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ElementType;
    use crate::processors::BoundingBox;

    fn info() -> CaptureInfo {
        CaptureInfo::from_path(Path::new("/tmp/shots/Login.PNG"), 2048, (400, 300), 3)
    }

    fn element(i: u32) -> UIElement {
        UIElement {
            element_type: ElementType::Button,
            bounding_box: BoundingBox::new(i * 10, 0, 20, 20),
            recognized_text: String::new(),
            description: format!("button at ({}, 0)", i * 10),
        }
    }

    #[test]
    fn test_capture_info_from_path() {
        let info = info();
        assert_eq!(info.file_name, "Login.PNG");
        assert_eq!(info.extension, ".png");

        let bare = CaptureInfo::from_path(Path::new("capture"), 0, (1, 1), 1);
        assert_eq!(bare.extension, "");
    }

    #[test]
    fn test_header_only() {
        assert_eq!(
            describe_screenshot(&info(), "", &[], 10),
            "Screenshot file: Login.PNG, size: 2048 bytes, type: .png, \
             dimensions: 400x300 pixels, 3 channels"
        );
    }

    #[test]
    fn test_text_and_elements() {
        let description = describe_screenshot(&info(), "Welcome", &[element(0), element(1)], 10);
        assert!(description.contains("\n\nExtracted text:\nWelcome"));
        assert!(description.ends_with(
            "\n\nDetected UI elements:\n- button: button at (0, 0)\n- button: button at (10, 0)"
        ));
    }

    #[test]
    fn test_element_list_is_truncated() {
        let elements: Vec<UIElement> = (0..13).map(element).collect();
        let description = describe_screenshot(&info(), "", &elements, 10);
        assert_eq!(description.matches("\n- button:").count(), 10);
        assert!(description.ends_with("\n... and 3 more elements"));
        assert!(!description.contains("button at (100, 0)"));
    }
}
