use serde::{Deserialize, Serialize};

/// A catalog entry. Field names are fixed by the persisted file format;
/// external tools reading the catalog rely on them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// A user's review of a book. At most one per username within a book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub username: String,
    pub review: String,
}
