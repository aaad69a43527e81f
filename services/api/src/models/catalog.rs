//! Catalog item model shared by the four product variants
//!
//! The variants (course books, notebooks & pads, writing supplies, other
//! items) share a numeric id, title, price, and description, and differ only
//! in their facet attribute set. Instead of four copy-pasted record types,
//! a single struct carries every facet as an option; absent facets are
//! omitted from JSON output.

use rust_decimal::Decimal;
use serde::Serialize;

/// Product variant selected by the `type` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductType {
    CourseBooks,
    NotebooksAndPads,
    WritingSupplies,
    Other,
}

impl ProductType {
    /// Parse the wire value of the `type` parameter
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "course-books" => Some(Self::CourseBooks),
            "notebooks-and-pads" => Some(Self::NotebooksAndPads),
            "writing-supplies" => Some(Self::WritingSupplies),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Wire value of this variant
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CourseBooks => "course-books",
            Self::NotebooksAndPads => "notebooks-and-pads",
            Self::WritingSupplies => "writing-supplies",
            Self::Other => "other",
        }
    }

    /// Table the variant's rows live in
    pub fn table(&self) -> &'static str {
        match self {
            Self::CourseBooks => "course_books",
            Self::NotebooksAndPads => "notebooks",
            Self::WritingSupplies => "writing_supplies",
            Self::Other => "other_items",
        }
    }
}

/// A catalog item of any variant
///
/// Immutable once seeded, except a course book's view counter.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogItem {
    pub id: i32,
    pub title: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ink_type: Option<String>,
    #[serde(rename = "viewCount", skip_serializing_if = "Option::is_none")]
    pub view_count: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_type_parses_known_values() {
        assert_eq!(
            ProductType::parse("course-books"),
            Some(ProductType::CourseBooks)
        );
        assert_eq!(
            ProductType::parse("notebooks-and-pads"),
            Some(ProductType::NotebooksAndPads)
        );
        assert_eq!(
            ProductType::parse("writing-supplies"),
            Some(ProductType::WritingSupplies)
        );
        assert_eq!(ProductType::parse("other"), Some(ProductType::Other));
        assert_eq!(ProductType::parse("stationery"), None);
        assert_eq!(ProductType::parse(""), None);
    }

    #[test]
    fn catalog_item_serialization_renames_type_fields() {
        let item = CatalogItem {
            id: 101,
            title: "Pink A5 Notebook Lined".to_string(),
            price: Decimal::new(1299, 2),
            kind: Some("Hardcover Notebooks".to_string()),
            cover_type: Some("Hard Cover".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&item).expect("serialize catalog item");
        assert_eq!(value["type"], "Hardcover Notebooks");
        assert_eq!(value["cover_type"], "Hard Cover");
        assert!(value.get("kind").is_none());
        assert!(value.get("viewCount").is_none());
        assert!(value.get("major").is_none());
    }
}
