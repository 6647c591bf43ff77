use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptySubscription, Request, Response, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::datamodel::Catalog;

mod dataloader;
mod loaders;
mod schema;

use dataloader::DataLoader;
use loaders::LoadBooks;
use schema::{Mutation, Query};

pub type FullSchema = Schema<Query, Mutation, EmptySubscription>;

#[derive(Clone)]
struct AppState {
    schema: FullSchema,
    catalog: Catalog,
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/").finish())
}

#[axum::debug_handler]
async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    execute(&state.schema, &state.catalog, req.into_inner())
        .await
        .into()
}

pub fn build_schema(catalog: Catalog) -> FullSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(catalog)
        .finish()
}

/// Executes `req` with a fresh set of per-request loaders.
pub async fn execute(schema: &FullSchema, catalog: &Catalog, req: Request) -> Response {
    let load_books = DataLoader::new(LoadBooks::new(catalog.clone()));
    let req = req.data(load_books.clone());

    load_books.wrap(schema.execute(req)).await
}

pub fn make_app(catalog: Catalog) -> Router {
    let schema = build_schema(catalog.clone());

    Router::new()
        .route("/", get(graphiql).post(graphql_handler))
        .route("/graphql", get(graphiql).post(graphql_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { schema, catalog })
}
