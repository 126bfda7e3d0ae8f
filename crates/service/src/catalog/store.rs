use std::{path::PathBuf, sync::Arc};

use tokio::{fs, sync::Mutex};

use super::domain::{Book, Review};
use crate::errors::ServiceError;

/// JSON file-backed book catalog.
///
/// The file holds one array of books in catalog order. Every read loads the
/// file fresh, so edits made outside the process show up on the next
/// request. Mutations go through [`CatalogStore::update`], which holds a
/// mutex across the whole load-mutate-save sequence so concurrent writers
/// cannot lose each other's updates.
#[derive(Clone)]
pub struct CatalogStore {
    file_path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CatalogStore {
    /// Initialize the store from a path. Creates the file with an empty
    /// catalog if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        if fs::metadata(&file_path).await.is_err() {
            let empty: Vec<Book> = Vec::new();
            let data = serde_json::to_vec_pretty(&empty)
                .map_err(|e| ServiceError::Storage(e.to_string()))?;
            fs::write(&file_path, data)
                .await
                .map_err(|e| ServiceError::Storage(e.to_string()))?;
        }

        Ok(Arc::new(Self {
            file_path,
            write_lock: Arc::new(Mutex::new(())),
        }))
    }

    /// Read and parse the full catalog.
    pub async fn load_all(&self) -> Result<Vec<Book>, ServiceError> {
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::Storage(e.to_string()))
    }

    /// Serialize and overwrite the catalog file, preserving order.
    pub async fn save_all(&self, books: &[Book]) -> Result<(), ServiceError> {
        let data =
            serde_json::to_vec_pretty(books).map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }

    /// Apply a mutation to the catalog and persist it, holding the write
    /// lock across load-mutate-save. If the mutation fails, nothing is
    /// written and the persisted catalog stays as it was.
    pub async fn update<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut Vec<Book>) -> Result<T, ServiceError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut books = self.load_all().await?;
        let out = f(&mut books)?;
        self.save_all(&books).await?;
        Ok(out)
    }

    /// The entire catalog, in file order.
    pub async fn get_all(&self) -> Result<Vec<Book>, ServiceError> {
        self.load_all().await
    }

    /// Exact match on isbn.
    pub async fn get_by_isbn(&self, isbn: &str) -> Result<Book, ServiceError> {
        let books = self.load_all().await?;
        books
            .into_iter()
            .find(|b| b.isbn == isbn)
            .ok_or_else(|| ServiceError::not_found("book"))
    }

    /// Case-insensitive exact match on the author field.
    pub async fn get_by_author(&self, author: &str) -> Result<Vec<Book>, ServiceError> {
        let needle = author.to_lowercase();
        let books = self.load_all().await?;
        Ok(books
            .into_iter()
            .filter(|b| b.author.to_lowercase() == needle)
            .collect())
    }

    /// Case-insensitive substring match on the title field.
    pub async fn get_by_title(&self, title: &str) -> Result<Vec<Book>, ServiceError> {
        let needle = title.to_lowercase();
        let books = self.load_all().await?;
        Ok(books
            .into_iter()
            .filter(|b| b.title.to_lowercase().contains(&needle))
            .collect())
    }

    /// Reviews of the matched book only.
    pub async fn get_reviews(&self, isbn: &str) -> Result<Vec<Review>, ServiceError> {
        Ok(self.get_by_isbn(isbn).await?.reviews)
    }
}
