//! Blocking reqwest client for the REST backend.

use super::dto::{self, CreateAdminRequest, ListPayload};
use super::{ApiError, ApiResponse, Country, CreateSchoolResponse, SchoolApi, SchoolSummary, Subscription};
use crate::config_file::ClientConfig;
use crate::draft::{AdminDraft, SchoolDraft};
use crate::wizard_state::SchoolId;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest slice of a non-JSON error body carried into an error message.
const MAX_ERROR_BODY: usize = 200;

/// HTTP implementation of [`SchoolApi`].
#[derive(Clone)]
pub struct HttpSchoolApi {
    client: Client,
    config: ClientConfig,
}

impl HttpSchoolApi {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let url = self.config.endpoint_url(path);
        debug!("GET {}", url);
        self.send(self.authorize(self.client.get(url)))
    }

    fn post<B: serde::Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let url = self.config.endpoint_url(path);
        debug!("POST {}", url);
        self.send(self.authorize(self.client.post(url).json(body)))
    }

    fn send<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R, ApiError> {
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = dto::error_message(&body).unwrap_or_else(|| {
                let trimmed = body.trim();
                match trimmed.char_indices().nth(MAX_ERROR_BODY) {
                    Some((cut, _)) => format!("{}...", &trimmed[..cut]),
                    None => trimmed.to_string(),
                }
            });
            warn!("Backend answered {}: {}", status, message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl SchoolApi for HttpSchoolApi {
    fn subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        self.get::<ListPayload<Subscription>>(&self.config.endpoints.subscriptions)?
            .into_items()
    }

    fn countries(&self) -> Result<Vec<Country>, ApiError> {
        self.get::<ListPayload<Country>>(&self.config.endpoints.countries)?
            .into_items()
    }

    fn create_school(&self, school: &SchoolDraft) -> Result<CreateSchoolResponse, ApiError> {
        self.post(&self.config.endpoints.create_school, school)
    }

    fn create_admin(
        &self,
        school_id: &SchoolId,
        admin: &AdminDraft,
    ) -> Result<ApiResponse, ApiError> {
        let body = CreateAdminRequest {
            admin,
            school_id: school_id.as_str(),
        };
        self.post(&self.config.endpoints.create_admin, &body)
    }

    fn schools(&self) -> Result<Vec<SchoolSummary>, ApiError> {
        self.get::<ListPayload<SchoolSummary>>(&self.config.endpoints.schools)?
            .into_items()
    }
}
