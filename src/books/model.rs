//! Book record types.

use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of a book's name and author.
pub const MAX_FIELD_LENGTH: usize = 128;

/// A stored book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub pages_amount: u32,
}

/// A book that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewBook {
    pub name: String,
    pub author: String,
    pub pages_amount: u32,
}

impl NewBook {
    pub fn new(name: impl Into<String>, author: impl Into<String>, pages_amount: u32) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            pages_amount,
        }
    }

    /// Validates the field contents.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        for (field, value) in [("name", &self.name), ("author", &self.author)] {
            if value.trim().is_empty() {
                return Some(format!("Book {} cannot be empty", field));
            }
            if value.chars().count() > MAX_FIELD_LENGTH {
                return Some(format!(
                    "Book {} exceeds maximum length of {} characters",
                    field, MAX_FIELD_LENGTH
                ));
            }
        }
        None
    }

    /// Turns this into a stored book with the given id.
    pub fn with_id(self, id: i64) -> Book {
        Book {
            id,
            name: self.name,
            author: self.author,
            pages_amount: self.pages_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_book() {
        let book = NewBook::new("Dune", "Frank Herbert", 412);
        assert!(book.validate().is_none());
    }

    #[test]
    fn test_validate_empty_name() {
        let book = NewBook::new("  ", "Frank Herbert", 412);
        assert!(book.validate().unwrap().contains("name"));
    }

    #[test]
    fn test_validate_long_author() {
        let book = NewBook::new("Dune", "x".repeat(MAX_FIELD_LENGTH + 1), 412);
        assert!(book.validate().unwrap().contains("author"));
    }

    #[test]
    fn test_with_id() {
        let book = NewBook::new("Dune", "Frank Herbert", 412).with_id(5);
        assert_eq!(book.id, 5);
        assert_eq!(book.name, "Dune");
        assert_eq!(book.pages_amount, 412);
    }

    #[test]
    fn test_book_serialize() {
        let book = NewBook::new("Dune", "Frank Herbert", 412).with_id(1);
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["author"], "Frank Herbert");
        assert_eq!(json["pages_amount"], 412);
    }
}
