// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use reqwest::blocking::Client;

use super::{Algorithm, ErrorBody, SearchResult, SolveRequest, Solver, SolverError};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Talks to a solver service over HTTP (`POST <base>/astar`, `POST <base>/dijkstra`).
#[derive(Debug, Clone)]
pub struct HttpSolver {
    client: Client,
    base_url: String,
}

impl HttpSolver {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SolverError> {
        let base_url = normalize_base_url(base_url.into());
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| SolverError::Transport { endpoint: base_url.clone(), source })?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, algorithm: Algorithm) -> String {
        format!("{}/{}", self.base_url, algorithm.endpoint())
    }
}

impl Solver for HttpSolver {
    fn solve(
        &self,
        algorithm: Algorithm,
        request: &SolveRequest,
    ) -> Result<SearchResult, SolverError> {
        let endpoint = self.endpoint(algorithm);
        tracing::debug!(%endpoint, rows = request.num_rows, cols = request.num_cols, "solve request");

        let response = self
            .client
            .post(&endpoint)
            .json(request)
            .send()
            .map_err(|source| SolverError::Transport { endpoint: endpoint.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|body| body.error)
                .unwrap_or_else(|_| body.trim().to_owned());
            return Err(SolverError::Status { endpoint, status: status.as_u16(), message });
        }

        let result = response
            .json::<SearchResult>()
            .map_err(|source| SolverError::Decode { endpoint: endpoint.clone(), source })?;
        result.check_aligned()?;
        tracing::debug!(
            %endpoint,
            visited = result.visited.len(),
            path = result.path.len(),
            "solve response"
        );
        Ok(result)
    }
}

fn normalize_base_url(raw: String) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_owned()
    } else {
        format!("http://{trimmed}")
    }
}
