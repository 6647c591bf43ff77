use async_graphql::{ComplexObject, Context, ID, InputObject, Object, Result, SimpleObject};
use thiserror::Error;

use crate::datamodel::{AuthorRecord, BookProjection, BookRecord, Catalog, Genre, NewBook};

use super::loaders::Loaders;

#[derive(Debug, Error)]
#[error("field `{0}` is not part of the requested projection")]
pub struct FieldNotProjected(&'static str);

fn projected<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or_else(|| FieldNotProjected(field).into())
}

/// A book, either complete or reduced to the fields asked for in `Author.books(fields:)`.
pub struct Book(BookProjection);

impl From<BookRecord> for Book {
    fn from(book: BookRecord) -> Self {
        Self(book.into())
    }
}

#[Object]
impl Book {
    async fn id(&self) -> Result<ID> {
        projected(self.0.id.clone().map(ID), "id")
    }

    async fn title(&self) -> Result<&str> {
        projected(self.0.title.as_deref(), "title")
    }

    async fn author_id(&self) -> Result<&str> {
        projected(self.0.author_id.as_deref(), "authorId")
    }

    async fn genre(&self) -> Result<Genre> {
        projected(self.0.genre, "genre")
    }
}

#[derive(SimpleObject)]
#[graphql(complex)]
pub struct Author {
    id: ID,
    name: String,
}

impl From<AuthorRecord> for Author {
    fn from(author: AuthorRecord) -> Self {
        Self {
            id: ID(author.id),
            name: author.name,
        }
    }
}

#[ComplexObject]
impl Author {
    /// Books written by this author. With `fields`, each book only carries the
    /// named fields that have a non-empty value.
    async fn books(&self, ctx: &Context<'_>, fields: Option<Vec<String>>) -> Result<Vec<Book>> {
        let books = ctx.load_books(&self.id).await?;
        let books = match fields {
            Some(fields) => books
                .iter()
                .map(|book| Book(book.project(fields.as_slice())))
                .collect(),
            None => books.into_iter().map(Book::from).collect(),
        };
        Ok(books)
    }
}

#[derive(InputObject)]
pub struct BookInput {
    title: String,
    author_id: String,
    genre: Genre,
}

impl From<BookInput> for NewBook {
    fn from(input: BookInput) -> Self {
        Self {
            title: input.title,
            author_id: input.author_id,
            genre: input.genre,
        }
    }
}

pub struct Query;

#[Object]
impl Query {
    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        let catalog = ctx.data::<Catalog>()?;
        Ok(catalog.books().into_iter().map(Book::from).collect())
    }

    async fn book(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Book>> {
        let catalog = ctx.data::<Catalog>()?;
        Ok(catalog.book(&id).map(Book::from))
    }

    async fn authors(&self, ctx: &Context<'_>) -> Result<Vec<Author>> {
        let catalog = ctx.data::<Catalog>()?;
        Ok(catalog.authors().into_iter().map(Author::from).collect())
    }

    async fn author(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Author>> {
        let catalog = ctx.data::<Catalog>()?;
        Ok(catalog.author(&id).map(Author::from))
    }
}

pub struct Mutation;

#[Object]
impl Mutation {
    /// Adds a book. The author is not required to exist.
    async fn add_book(&self, ctx: &Context<'_>, book: BookInput) -> Result<Book> {
        let catalog = ctx.data::<Catalog>()?;
        Ok(catalog.add_book(book.into()).into())
    }
}
