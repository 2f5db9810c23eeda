// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HTTP solver service (axum).
//!
//! Serves the in-process search as `POST /astar` and `POST /dijkstra`. Invalid requests answer
//! 400 with `{"error": "..."}`.

use std::future::Future;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;

use super::{search, Algorithm, ErrorBody, SolveRequest, SolverError};

pub fn router() -> Router {
    Router::new()
        .route("/astar", post(solve_astar))
        .route("/dijkstra", post(solve_dijkstra))
}

/// Serves [`router`] on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "solver service listening");
    }
    axum::serve(listener, router()).with_graceful_shutdown(shutdown).await
}

async fn solve_astar(payload: Result<Json<SolveRequest>, JsonRejection>) -> Response {
    solve(Algorithm::AStar, payload).await
}

async fn solve_dijkstra(payload: Result<Json<SolveRequest>, JsonRejection>) -> Response {
    solve(Algorithm::Dijkstra, payload).await
}

async fn solve(
    algorithm: Algorithm,
    payload: Result<Json<SolveRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(endpoint = algorithm.endpoint(), %rejection, "rejected solve payload");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let outcome =
        tokio::task::spawn_blocking(move || search::search(algorithm, &request)).await;
    match outcome {
        Ok(Ok(result)) => {
            tracing::info!(
                endpoint = algorithm.endpoint(),
                visited = result.visited.len(),
                path = result.path.len(),
                "solved"
            );
            Json(result).into_response()
        }
        Ok(Err(SolverError::Rejected(message))) => {
            tracing::warn!(endpoint = algorithm.endpoint(), %message, "rejected solve request");
            error_response(StatusCode::BAD_REQUEST, message)
        }
        Ok(Err(err)) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        Err(join_err) => {
            tracing::error!(endpoint = algorithm.endpoint(), %join_err, "search task failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, join_err.to_string())
        }
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}
