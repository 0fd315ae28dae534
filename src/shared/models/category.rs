//! Product categories.
//!
//! Categories travel over the wire as their integer code so that clients can
//! filter with `?categories=0,2`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "i64", into = "i64")]
pub enum Category {
    #[default]
    ArtsCrafts,
    Books,
    Electronics,
    Fashion,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::ArtsCrafts,
        Category::Books,
        Category::Electronics,
        Category::Fashion,
    ];

    pub fn code(self) -> i64 {
        match self {
            Category::ArtsCrafts => 0,
            Category::Books => 1,
            Category::Electronics => 2,
            Category::Fashion => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl TryFrom<i64> for Category {
    type Error = SharedError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code)
            .ok_or_else(|| SharedError::validation("category", format!("unknown category {code}")))
    }
}

impl From<Category> for i64 {
    fn from(category: Category) -> Self {
        category.code()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::ArtsCrafts => "Arts & Crafts",
            Category::Books => "Books",
            Category::Electronics => "Electronics",
            Category::Fashion => "Fashion",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Category::Electronics).unwrap(), "2");
        let parsed: Category = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, Category::Fashion);
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!(serde_json::from_str::<Category>("9").is_err());
        assert_eq!(Category::from_code(-1), None);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Category::ArtsCrafts.to_string(), "Arts & Crafts");
        assert_eq!(Category::Books.to_string(), "Books");
    }
}
