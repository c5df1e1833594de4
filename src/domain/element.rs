//! UI element types produced by screenshot analysis.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::processors::BoundingBox;

/// The closed set of element kinds the classifier can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Button,
    TextField,
    SearchField,
    EmailField,
    PasswordField,
    Menu,
    Scrollbar,
    Container,
}

impl ElementType {
    /// Returns the snake_case label used in descriptions and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Button => "button",
            ElementType::TextField => "text_field",
            ElementType::SearchField => "search_field",
            ElementType::EmailField => "email_field",
            ElementType::PasswordField => "password_field",
            ElementType::Menu => "menu",
            ElementType::Scrollbar => "scrollbar",
            ElementType::Container => "container",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified UI element.
///
/// Created by segmentation and classification for one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UIElement {
    /// The assigned element kind.
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// Position of the element in the source capture.
    pub bounding_box: BoundingBox,
    /// Text recognized inside the element, empty if none.
    pub recognized_text: String,
    /// The recognized text, or `"<type> at (<x>, <y>)"` when there is none.
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type_labels() {
        assert_eq!(ElementType::PasswordField.to_string(), "password_field");
        assert_eq!(
            serde_json::to_string(&ElementType::SearchField).unwrap(),
            "\"search_field\""
        );
    }

    #[test]
    fn test_ui_element_serializes_type_key() {
        let element = UIElement {
            element_type: ElementType::Button,
            bounding_box: BoundingBox::new(10, 20, 30, 30),
            recognized_text: String::new(),
            description: "button at (10, 20)".to_string(),
        };
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "button");
        assert_eq!(json["bounding_box"]["x"], 10);
        assert_eq!(json["bounding_box"]["height"], 30);
    }
}
