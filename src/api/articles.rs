// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Article API endpoints.
//!
//! Every endpoint requires authentication and only ever sees articles owned
//! by the caller. An article owned by someone else answers 404, never 403.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    articles::Submission,
    auth::Auth,
    error::ApiError,
    models::{Article, ArticleParams},
    state::AppState,
    validation::FieldErrors,
};

const MALFORMED_PAYLOAD: &str = "is missing or malformed";

/// Turn the decoded body into a submission. Decoding failures become a
/// validation error so they are reported after the ownership check.
fn submission(payload: Result<Json<ArticleParams>, JsonRejection>) -> Submission {
    payload
        .map(|Json(params)| params.article)
        .map_err(|rejection| {
            tracing::debug!(error = %rejection.body_text(), "Undecodable article payload");
            FieldErrors::single("article", MALFORMED_PAYLOAD)
        })
}

/// The article id as sent. An id that cannot be decoded matches no article.
fn requested_id(path: Result<Path<String>, PathRejection>) -> String {
    match path {
        Ok(Path(id)) => id,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Undecodable article id");
            String::new()
        }
    }
}

/// List the caller's articles.
#[utoipa::path(
    get,
    path = "/api/articles",
    tag = "Articles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Articles owned by the caller", body = [Article]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_articles(
    Auth(principal): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = state.articles().list(&principal)?;
    Ok(Json(articles))
}

/// Get one of the caller's articles.
#[utoipa::path(
    get,
    path = "/api/articles/{article_id}",
    tag = "Articles",
    security(("bearer_auth" = [])),
    params(
        ("article_id" = String, Path, description = "Article ID")
    ),
    responses(
        (status = 200, description = "Article details", body = Article),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Article not found")
    )
)]
pub async fn get_article(
    Auth(principal): Auth,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Article>, ApiError> {
    let article = state.articles().get(&principal, &requested_id(path))?;
    Ok(Json(article))
}

/// Create an article owned by the caller.
#[utoipa::path(
    post,
    path = "/api/articles",
    tag = "Articles",
    security(("bearer_auth" = [])),
    request_body = ArticleParams,
    responses(
        (status = 201, description = "Article created", body = Article),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Invalid attributes", body = FieldErrors)
    )
)]
pub async fn create_article(
    Auth(principal): Auth,
    State(state): State<AppState>,
    payload: Result<Json<ArticleParams>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let article = state.articles().create(&principal, submission(payload))?;
    let location = format!("/api/articles/{}", article.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(article)))
}

/// Update one of the caller's articles. Only supplied fields change.
#[utoipa::path(
    patch,
    path = "/api/articles/{article_id}",
    tag = "Articles",
    security(("bearer_auth" = [])),
    params(
        ("article_id" = String, Path, description = "Article ID")
    ),
    request_body = ArticleParams,
    responses(
        (status = 200, description = "Article updated", body = Article),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Article not found"),
        (status = 422, description = "Invalid attributes", body = FieldErrors)
    )
)]
pub async fn update_article(
    Auth(principal): Auth,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<ArticleParams>, JsonRejection>,
) -> Result<Json<Article>, ApiError> {
    let article = state
        .articles()
        .update(&principal, &requested_id(path), submission(payload))?;
    Ok(Json(article))
}

/// Delete one of the caller's articles.
#[utoipa::path(
    delete,
    path = "/api/articles/{article_id}",
    tag = "Articles",
    security(("bearer_auth" = [])),
    params(
        ("article_id" = String, Path, description = "Article ID")
    ),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Article not found")
    )
)]
pub async fn delete_article(
    Auth(principal): Auth,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    state.articles().delete(&principal, &requested_id(path))?;
    Ok(StatusCode::NO_CONTENT)
}
