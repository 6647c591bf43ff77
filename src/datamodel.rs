use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::Enum;
use parking_lot::RwLock;

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
#[graphql(rename_items = "PascalCase")]
pub enum Genre {
    Mystery,
    Fantasy,
    Classic,
    Fiction,
}

pub struct SeedAuthor {
    pub id: &'static str,
    pub name: &'static str,
}

pub struct SeedBook {
    pub id: &'static str,
    pub title: &'static str,
    pub author_id: &'static str,
    pub genre: Genre,
}

pub static ALL_AUTHORS: &[SeedAuthor] = &[
    SeedAuthor {
        id: "1",
        name: "F. Scott Fitzgerald",
    },
    SeedAuthor {
        id: "2",
        name: "Harper Lee",
    },
    SeedAuthor {
        id: "3",
        name: "J.D. Salinger",
    },
    SeedAuthor {
        id: "4",
        name: "J.K. Rowling",
    },
];

pub static ALL_BOOKS: &[SeedBook] = &[
    SeedBook {
        id: "1",
        title: "The Great Gatsby",
        author_id: "1",
        genre: Genre::Classic,
    },
    SeedBook {
        id: "2",
        title: "To Kill a Mockingbird",
        author_id: "2",
        genre: Genre::Classic,
    },
    SeedBook {
        id: "3",
        title: "The Catcher in the Rye",
        author_id: "3",
        genre: Genre::Classic,
    },
    SeedBook {
        id: "4",
        title: "Harry Potter and the Philosopher's Stone",
        author_id: "4",
        genre: Genre::Fantasy,
    },
    SeedBook {
        id: "5",
        title: "Tender Is the Night",
        author_id: "1",
        genre: Genre::Classic,
    },
    SeedBook {
        id: "6",
        title: "Harry Potter and the Chamber of Secrets",
        author_id: "4",
        genre: Genre::Fantasy,
    },
];

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorRecord {
    pub id: String,
    pub name: String,
}

impl From<&SeedAuthor> for AuthorRecord {
    fn from(seed: &SeedAuthor) -> Self {
        Self {
            id: seed.id.into(),
            name: seed.name.into(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub author_id: String,
    pub genre: Genre,
}

impl From<&SeedBook> for BookRecord {
    fn from(seed: &SeedBook) -> Self {
        Self {
            id: seed.id.into(),
            title: seed.title.into(),
            author_id: seed.author_id.into(),
            genre: seed.genre,
        }
    }
}

impl BookRecord {
    /// Reduces the book to the named fields.
    ///
    /// Field names are the GraphQL ones (`id`, `title`, `authorId`, `genre`).
    /// Unknown names are ignored, and string fields that are empty are left out
    /// even when requested.
    pub fn project<S: AsRef<str>>(&self, fields: &[S]) -> BookProjection {
        let mut projection = BookProjection::default();
        for field in fields {
            match field.as_ref() {
                "id" => projection.id = non_empty(&self.id),
                "title" => projection.title = non_empty(&self.title),
                "authorId" => projection.author_id = non_empty(&self.author_id),
                "genre" => projection.genre = Some(self.genre),
                _ => {}
            }
        }
        projection
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

/// A book with any subset of its fields present.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BookProjection {
    pub id: Option<String>,
    pub title: Option<String>,
    pub author_id: Option<String>,
    pub genre: Option<Genre>,
}

impl From<BookRecord> for BookProjection {
    fn from(book: BookRecord) -> Self {
        Self {
            id: Some(book.id),
            title: Some(book.title),
            author_id: Some(book.author_id),
            genre: Some(book.genre),
        }
    }
}

/// The fields a client supplies when adding a book.
#[derive(Clone, Debug)]
pub struct NewBook {
    pub title: String,
    pub author_id: String,
    pub genre: Genre,
}

struct Shelves {
    books: Vec<BookRecord>,
    authors: Vec<AuthorRecord>,
    next_id: u64,
}

/// Shared handle to the in-memory catalog.
///
/// Cloning is cheap, all clones see the same books and authors.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<RwLock<Shelves>>,
}

impl Catalog {
    pub fn new(books: Vec<BookRecord>, authors: Vec<AuthorRecord>) -> Self {
        // ids are never reused, even if a caller seeds non-contiguous ones
        let next_id = books
            .iter()
            .filter_map(|book| book.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let shelves = Shelves {
            books,
            authors,
            next_id,
        };
        Self {
            inner: Arc::new(RwLock::new(shelves)),
        }
    }

    pub fn seeded() -> Self {
        Self::new(
            ALL_BOOKS.iter().map(BookRecord::from).collect(),
            ALL_AUTHORS.iter().map(AuthorRecord::from).collect(),
        )
    }

    pub fn books(&self) -> Vec<BookRecord> {
        self.inner.read().books.clone()
    }

    pub fn book(&self, id: &str) -> Option<BookRecord> {
        self.inner.read().books.iter().find(|b| b.id == id).cloned()
    }

    pub fn authors(&self) -> Vec<AuthorRecord> {
        self.inner.read().authors.clone()
    }

    pub fn author(&self, id: &str) -> Option<AuthorRecord> {
        self.inner.read().authors.iter().find(|a| a.id == id).cloned()
    }

    /// Groups the books of several authors in a single pass.
    ///
    /// Every requested id is present in the result, authors without books map
    /// to an empty list.
    pub fn books_by_authors(&self, author_ids: &[String]) -> HashMap<String, Vec<BookRecord>> {
        let mut grouped: HashMap<String, Vec<BookRecord>> = author_ids
            .iter()
            .map(|id| (id.clone(), Vec::new()))
            .collect();
        for book in &self.inner.read().books {
            if let Some(books) = grouped.get_mut(&book.author_id) {
                books.push(book.clone());
            }
        }
        grouped
    }

    pub fn add_book(&self, new_book: NewBook) -> BookRecord {
        let mut shelves = self.inner.write();

        if !shelves.authors.iter().any(|a| a.id == new_book.author_id) {
            tracing::debug!(
                author_id = %new_book.author_id,
                "adding book for unknown author"
            );
        }

        let book = BookRecord {
            id: shelves.next_id.to_string(),
            title: new_book.title,
            author_id: new_book.author_id,
            genre: new_book.genre,
        };
        shelves.next_id += 1;
        shelves.books.push(book.clone());

        tracing::info!(id = %book.id, title = %book.title, "added book");
        book
    }
}
