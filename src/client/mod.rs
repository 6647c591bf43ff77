use cynic::http::ReqwestExt;
use cynic::serde;
use reqwest::Url;

pub struct Client {
    client: reqwest::Client,
    url: Url,
}

impl Client {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub async fn run<ResponseData, Vars>(
        &self,
        op: cynic::Operation<ResponseData, Vars>,
    ) -> cynic::GraphQlResponse<ResponseData>
    where
        Vars: serde::Serialize,
        ResponseData: serde::de::DeserializeOwned + 'static,
    {
        self.client
            .post(self.url.clone())
            .run_graphql(op)
            .await
            .unwrap()
    }
}

#[cynic::schema("library")]
mod schema {}

#[derive(cynic::Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Genre {
    #[cynic(rename = "Mystery")]
    Mystery,
    #[cynic(rename = "Fantasy")]
    Fantasy,
    #[cynic(rename = "Classic")]
    Classic,
    #[cynic(rename = "Fiction")]
    Fiction,
}

#[derive(cynic::QueryFragment, Debug)]
pub struct Book {
    pub id: cynic::Id,
    pub title: String,
    pub author_id: String,
    pub genre: Genre,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Book")]
pub struct BookTitle {
    pub title: String,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query")]
pub struct AllBooks {
    pub books: Vec<Book>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct ById {
    pub id: cynic::Id,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "ById")]
pub struct BookById {
    #[arguments(id: $id)]
    pub book: Option<Book>,
}

#[derive(cynic::QueryFragment, Debug)]
pub struct Author {
    pub id: cynic::Id,
    pub name: String,
    pub books: Vec<Book>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query")]
pub struct AllAuthors {
    pub authors: Vec<Author>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "ById")]
pub struct AuthorById {
    #[arguments(id: $id)]
    pub author: Option<Author>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Author")]
pub struct AuthorTitles {
    pub name: String,
    #[arguments(fields: ["title"])]
    pub books: Vec<BookTitle>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "ById")]
pub struct AuthorTitlesById {
    #[arguments(id: $id)]
    pub author: Option<AuthorTitles>,
}

#[derive(cynic::InputObject, Debug)]
pub struct BookInput {
    pub title: String,
    pub author_id: String,
    pub genre: Genre,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct AddBookVariables {
    pub book: BookInput,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "AddBookVariables")]
pub struct AddBook {
    #[arguments(book: $book)]
    pub add_book: Book,
}
