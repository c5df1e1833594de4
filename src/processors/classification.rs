//! Heuristic UI-element classification.
//!
//! Classification is a decision table evaluated in two passes. Geometry is
//! always available and runs first. Recognized text, when present, is then
//! matched against keyword rules and overrides the geometric label.

use crate::domain::{ElementType, UIElement};
use crate::processors::geometry::BoundingBox;

/// A geometric rule: the first matching rule assigns the label.
struct GeometryRule {
    label: ElementType,
    applies: fn(&BoundingBox) -> bool,
}

/// A textual rule: matches if the lowercased text contains any keyword.
struct TextRule {
    label: ElementType,
    keywords: &'static [&'static str],
}

const GEOMETRY_RULES: &[GeometryRule] = &[
    GeometryRule {
        label: ElementType::TextField,
        applies: |b| b.aspect_ratio() > 3.0,
    },
    GeometryRule {
        label: ElementType::Scrollbar,
        applies: |b| b.aspect_ratio() < 0.5,
    },
    GeometryRule {
        label: ElementType::Button,
        applies: |b| {
            let ratio = b.aspect_ratio();
            b.width < 50 && b.height < 50 && (0.8..=1.2).contains(&ratio)
        },
    },
];

const TEXT_RULES: &[TextRule] = &[
    TextRule {
        label: ElementType::Button,
        keywords: &["submit", "login", "sign"],
    },
    TextRule {
        label: ElementType::SearchField,
        keywords: &["search"],
    },
    TextRule {
        label: ElementType::EmailField,
        keywords: &["@"],
    },
    TextRule {
        label: ElementType::PasswordField,
        keywords: &["password"],
    },
    TextRule {
        label: ElementType::Menu,
        keywords: &["menu"],
    },
];

/// Label assigned from geometry alone.
pub fn classify_by_geometry(bbox: &BoundingBox) -> ElementType {
    GEOMETRY_RULES
        .iter()
        .find(|rule| (rule.applies)(bbox))
        .map_or(ElementType::Container, |rule| rule.label)
}

/// Label implied by recognized text, if any rule matches.
pub fn classify_by_text(text: &str) -> Option<ElementType> {
    if text.is_empty() {
        return None;
    }
    let lowered = text.to_lowercase();
    TEXT_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
        .map(|rule| rule.label)
}

/// Assigns element types to candidate regions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementClassifier;

impl ElementClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifies one region.
    ///
    /// The description is the recognized text, or `"<type> at (<x>, <y>)"`
    /// when none was recognized.
    pub fn classify(&self, bbox: &BoundingBox, recognized_text: &str) -> UIElement {
        let element_type =
            classify_by_text(recognized_text).unwrap_or_else(|| classify_by_geometry(bbox));
        let description = if recognized_text.is_empty() {
            format!("{} at ({}, {})", element_type, bbox.x, bbox.y)
        } else {
            recognized_text.to_string()
        };
        UIElement {
            element_type,
            bounding_box: *bbox,
            recognized_text: recognized_text.to_string(),
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(w: u32, h: u32) -> BoundingBox {
        BoundingBox::new(12, 34, w, h)
    }

    #[test]
    fn test_geometry_rules() {
        assert_eq!(classify_by_geometry(&bbox(200, 40)), ElementType::TextField);
        assert_eq!(classify_by_geometry(&bbox(12, 200)), ElementType::Scrollbar);
        assert_eq!(classify_by_geometry(&bbox(30, 30)), ElementType::Button);
        assert_eq!(classify_by_geometry(&bbox(40, 45)), ElementType::Button);
        assert_eq!(classify_by_geometry(&bbox(40, 50)), ElementType::Container);
        assert_eq!(classify_by_geometry(&bbox(40, 20)), ElementType::Container);
        assert_eq!(classify_by_geometry(&bbox(80, 80)), ElementType::Container);
    }

    #[test]
    fn test_button_ratio_bounds_are_inclusive() {
        assert_eq!(classify_by_geometry(&bbox(24, 30)), ElementType::Button);
        assert_eq!(classify_by_geometry(&bbox(36, 30)), ElementType::Button);
        assert_eq!(classify_by_geometry(&bbox(37, 30)), ElementType::Container);
    }

    #[test]
    fn test_text_rules_in_order() {
        assert_eq!(classify_by_text("Submit"), Some(ElementType::Button));
        assert_eq!(classify_by_text("LOGIN"), Some(ElementType::Button));
        assert_eq!(classify_by_text("Search sign-ups"), Some(ElementType::Button));
        assert_eq!(classify_by_text("Search"), Some(ElementType::SearchField));
        assert_eq!(classify_by_text("me@example.com"), Some(ElementType::EmailField));
        assert_eq!(classify_by_text("Password"), Some(ElementType::PasswordField));
        assert_eq!(classify_by_text("Main menu"), Some(ElementType::Menu));
        assert_eq!(classify_by_text("Welcome back"), None);
        assert_eq!(classify_by_text(""), None);
    }

    #[test]
    fn test_text_overrides_geometry() {
        let classifier = ElementClassifier::new();
        let element = classifier.classify(&bbox(40, 20), "Submit");
        assert_eq!(element.element_type, ElementType::Button);
        assert_eq!(element.description, "Submit");
        assert_eq!(element.recognized_text, "Submit");
    }

    #[test]
    fn test_description_without_text() {
        let element = ElementClassifier::new().classify(&bbox(300, 40), "");
        assert_eq!(element.element_type, ElementType::TextField);
        assert_eq!(element.description, "text_field at (12, 34)");
        assert!(element.recognized_text.is_empty());
    }

    #[test]
    fn test_unmatched_text_keeps_geometry() {
        let element = ElementClassifier::new().classify(&bbox(12, 200), "Terms of service");
        assert_eq!(element.element_type, ElementType::Scrollbar);
        assert_eq!(element.description, "Terms of service");
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = ElementClassifier::new();
        for (w, h, text) in [(40, 20, "Submit"), (30, 30, ""), (200, 20, "search")] {
            let first = classifier.classify(&bbox(w, h), text);
            let second = classifier.classify(&bbox(w, h), text);
            assert_eq!(first, second);
        }
    }
}
