//! Review manager: enforces one review per user per book.
//!
//! Both operations run inside [`CatalogStore::update`], so the whole
//! load-mutate-save sequence is a critical section over the catalog file.
//! Identity is trusted as given; the HTTP layer verifies tokens first.

use std::sync::Arc;

use tracing::info;

use crate::catalog::{CatalogStore, Review};
use crate::errors::ServiceError;

pub struct ReviewManager {
    catalog: Arc<CatalogStore>,
}

impl ReviewManager {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self { catalog }
    }

    /// Create or replace `username`'s review of the book. An existing review
    /// keeps its position in the list; a new one is appended. Returns the
    /// book's updated review list.
    pub async fn upsert_review(
        &self,
        isbn: &str,
        username: &str,
        text: &str,
    ) -> Result<Vec<Review>, ServiceError> {
        let reviews = self
            .catalog
            .update(|books| {
                let book = books
                    .iter_mut()
                    .find(|b| b.isbn == isbn)
                    .ok_or_else(|| ServiceError::not_found("book"))?;

                match book.reviews.iter_mut().find(|r| r.username == username) {
                    Some(existing) => existing.review = text.to_string(),
                    None => book.reviews.push(Review {
                        username: username.to_string(),
                        review: text.to_string(),
                    }),
                }
                Ok(book.reviews.clone())
            })
            .await?;
        info!(%isbn, %username, "review_upserted");
        Ok(reviews)
    }

    /// Remove `username`'s review of the book, preserving the order of the
    /// remaining reviews. Returns the updated list.
    pub async fn delete_review(
        &self,
        isbn: &str,
        username: &str,
    ) -> Result<Vec<Review>, ServiceError> {
        let reviews = self
            .catalog
            .update(|books| {
                let book = books
                    .iter_mut()
                    .find(|b| b.isbn == isbn)
                    .ok_or_else(|| ServiceError::not_found("book"))?;

                let pos = book
                    .reviews
                    .iter()
                    .position(|r| r.username == username)
                    .ok_or_else(|| ServiceError::not_found("review"))?;
                book.reviews.remove(pos);
                Ok(book.reviews.clone())
            })
            .await?;
        info!(%isbn, %username, "review_deleted");
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Book;

    async fn seeded() -> (Arc<CatalogStore>, ReviewManager, std::path::PathBuf) {
        let tmp = std::env::temp_dir().join(format!("reviews_{}.json", uuid::Uuid::new_v4()));
        let store = CatalogStore::new(&tmp).await.unwrap();
        store
            .save_all(&[Book {
                isbn: "0001".into(),
                title: "Nineteen Eighty-Four".into(),
                author: "George Orwell".into(),
                reviews: Vec::new(),
            }])
            .await
            .unwrap();
        let mgr = ReviewManager::new(Arc::clone(&store));
        (store, mgr, tmp)
    }

    #[tokio::test]
    async fn upsert_is_idempotent_per_user() {
        let (_store, mgr, tmp) = seeded().await;

        let reviews = mgr.upsert_review("0001", "alice", "great").await.unwrap();
        assert_eq!(reviews.len(), 1);

        // same user again: replaced in place, never a second entry
        let reviews = mgr.upsert_review("0001", "alice", "great").await.unwrap();
        assert_eq!(reviews.len(), 1);
        let reviews = mgr.upsert_review("0001", "alice", "better").await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].review, "better");

        let _ = tokio::fs::remove_file(&tmp).await;
    }

    #[tokio::test]
    async fn replaced_review_keeps_its_position() {
        let (_store, mgr, tmp) = seeded().await;

        mgr.upsert_review("0001", "alice", "first").await.unwrap();
        mgr.upsert_review("0001", "bob", "second").await.unwrap();
        let reviews = mgr.upsert_review("0001", "alice", "edited").await.unwrap();

        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].username, "alice");
        assert_eq!(reviews[0].review, "edited");
        assert_eq!(reviews[1].username, "bob");

        let _ = tokio::fs::remove_file(&tmp).await;
    }

    #[tokio::test]
    async fn delete_only_removes_the_owners_review() {
        let (_store, mgr, tmp) = seeded().await;

        mgr.upsert_review("0001", "alice", "one").await.unwrap();
        mgr.upsert_review("0001", "bob", "two").await.unwrap();

        let reviews = mgr.delete_review("0001", "alice").await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].username, "bob");

        // alice has nothing left to delete
        assert!(matches!(
            mgr.delete_review("0001", "alice").await,
            Err(ServiceError::NotFound(_))
        ));

        let _ = tokio::fs::remove_file(&tmp).await;
    }

    #[tokio::test]
    async fn unknown_isbn_is_not_found_and_persists_nothing() {
        let (store, mgr, tmp) = seeded().await;

        assert!(matches!(
            mgr.upsert_review("9999", "alice", "x").await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            mgr.delete_review("9999", "alice").await,
            Err(ServiceError::NotFound(_))
        ));

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].reviews.is_empty());

        let _ = tokio::fs::remove_file(&tmp).await;
    }

    #[tokio::test]
    async fn mutations_survive_a_reload() {
        let (_store, mgr, tmp) = seeded().await;

        mgr.upsert_review("0001", "alice", "kept").await.unwrap();

        let reloaded = CatalogStore::new(&tmp).await.unwrap();
        let reviews = reloaded.get_reviews("0001").await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].review, "kept");

        let _ = tokio::fs::remove_file(&tmp).await;
    }
}
