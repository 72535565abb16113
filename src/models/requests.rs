//! Request DTOs for the book service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::books::NewBook;

/// Request body for creating a book (POST /books)
///
/// # Fields
/// - `name`: Unique title of the book
/// - `author`: Unique author name
/// - `pages_amount`: Number of pages
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookRequest {
    pub name: String,
    pub author: String,
    pub pages_amount: u32,
}

impl From<CreateBookRequest> for NewBook {
    fn from(req: CreateBookRequest) -> Self {
        NewBook::new(req.name, req.author, req.pages_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialize() {
        let json = r#"{"name": "Dune", "author": "Frank Herbert", "pages_amount": 412}"#;
        let req: CreateBookRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Dune");
        assert_eq!(req.author, "Frank Herbert");
        assert_eq!(req.pages_amount, 412);
    }

    #[test]
    fn test_create_request_rejects_negative_pages() {
        let json = r#"{"name": "Dune", "author": "Frank Herbert", "pages_amount": -1}"#;
        assert!(serde_json::from_str::<CreateBookRequest>(json).is_err());
    }

    #[test]
    fn test_into_new_book() {
        let req = CreateBookRequest {
            name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            pages_amount: 412,
        };
        assert_eq!(NewBook::from(req), NewBook::new("Dune", "Frank Herbert", 412));
    }
}
