//! reqwest-backed client for the analysis service's JSON API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{Exercise, ExerciseId},
    error::{ApiErrorBody, ServiceError},
    protocol::{HealthResponse, StartExerciseRequest, StatsSnapshot, StopExerciseResponse},
};

use crate::StatsService;

pub struct HttpStatsService {
    http: Client,
    base_url: String,
}

impl HttpStatsService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn error_for(response: Response) -> ServiceError {
        let status = response.status().as_u16();
        match response.json::<ApiErrorBody>().await {
            Ok(body) => ServiceError::new(status, body.error),
            Err(_) => ServiceError::new(status, "unexpected service response"),
        }
    }
}

#[async_trait]
impl StatsService for HttpStatsService {
    async fn list_exercises(&self) -> Result<Vec<Exercise>> {
        let response = self
            .http
            .get(self.endpoint("/exercises"))
            .send()
            .await
            .context("exercise catalog request failed")?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await.into());
        }

        response
            .json::<Vec<Exercise>>()
            .await
            .context("malformed exercise catalog")
    }

    async fn start_exercise(&self, id: &ExerciseId) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("/start_exercise"))
            .json(&StartExerciseRequest {
                exercise: id.clone(),
            })
            .send()
            .await
            .context("start_exercise request failed")?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await.into());
        }

        // Success body is an acknowledgment message only.
        Ok(())
    }

    async fn fetch_stats(&self) -> Result<StatsSnapshot> {
        let response = self
            .http
            .get(self.endpoint("/stats"))
            .send()
            .await
            .context("stats request failed")?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await.into());
        }

        response
            .json::<StatsSnapshot>()
            .await
            .context("malformed stats payload")
    }

    async fn stop_exercise(&self) -> Result<Option<StatsSnapshot>> {
        let response = self
            .http
            .post(self.endpoint("/stop_exercise"))
            .send()
            .await
            .context("stop_exercise request failed")?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await.into());
        }

        let body = response
            .json::<StopExerciseResponse>()
            .await
            .context("malformed stop_exercise response")?;
        Ok(body.final_stats)
    }

    async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .http
            .get(self.endpoint("/health"))
            .send()
            .await
            .context("health request failed")?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await.into());
        }

        response
            .json::<HealthResponse>()
            .await
            .context("malformed health response")
    }
}
