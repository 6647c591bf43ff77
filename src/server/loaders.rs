use std::collections::HashMap;

use async_graphql::{Context, Result};

use crate::datamodel::{BookRecord, Catalog};

use super::dataloader::{BatchLoader, DataLoader};

pub trait Loaders {
    async fn load_books(&self, author_id: &str) -> Result<Vec<BookRecord>>;
}

impl Loaders for Context<'_> {
    async fn load_books(&self, author_id: &str) -> Result<Vec<BookRecord>> {
        let books = self
            .data::<DataLoader<LoadBooks>>()?
            .load(author_id.to_owned())
            .await;
        Ok(books.unwrap_or_default())
    }
}

/// Loads the books written by a batch of authors, keyed by author id.
pub struct LoadBooks {
    catalog: Catalog,
}

impl LoadBooks {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

impl BatchLoader for LoadBooks {
    type K = String;
    type V = Vec<BookRecord>;

    fn load_batch(
        &mut self,
        keys: Vec<Self::K>,
    ) -> impl Future<Output = HashMap<Self::K, Self::V>> + Send + 'static {
        let catalog = self.catalog.clone();
        async move {
            let debug_keys = keys.join("`, `");
            tracing::debug!("resolving books by `{debug_keys}`");

            catalog.books_by_authors(&keys)
        }
    }
}
