use crate::models::{
    ErrorBody, Event, EventPatch, LoginRequest, MessageResponse, NewEvent, NewTraining, Training,
    TrainingPatch, ValidationError,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {status}: {}", .body.error)]
    Server { status: u16, body: ErrorBody },
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Calls the portal REST API. One call per method, no retries.
#[async_trait]
pub trait PortalApi: Send + Sync {
    async fn list_events(&self) -> Result<Vec<Event>, ClientError>;
    async fn create_event(&self, draft: &NewEvent) -> Result<Event, ClientError>;
    async fn update_event(
        &self,
        id: Uuid,
        patch: &EventPatch,
    ) -> Result<Option<Event>, ClientError>;
    async fn delete_event(&self, id: Uuid) -> Result<MessageResponse, ClientError>;
    async fn enroll_volunteer(&self, id: Uuid) -> Result<Event, ClientError>;

    async fn list_trainings(&self) -> Result<Vec<Training>, ClientError>;
    async fn create_training(&self, draft: &NewTraining) -> Result<Training, ClientError>;
    async fn update_training(
        &self,
        id: Uuid,
        patch: &TrainingPatch,
    ) -> Result<Option<Training>, ClientError>;
    async fn delete_training(&self, id: Uuid) -> Result<MessageResponse, ClientError>;
    async fn enroll_participant(&self, id: Uuid) -> Result<Training, ClientError>;

    async fn login(&self, email: &str, password: &str) -> Result<MessageResponse, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.json::<ErrorBody>().await.unwrap_or_else(|_| ErrorBody {
        error: status.to_string(),
        message: String::new(),
    });
    Err(ClientError::Server {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl PortalApi for HttpApi {
    async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        decode(self.client.get(self.url("/events")).send().await?).await
    }

    async fn create_event(&self, draft: &NewEvent) -> Result<Event, ClientError> {
        let response = self.client.post(self.url("/events")).json(draft).send().await?;
        decode(response).await
    }

    async fn update_event(
        &self,
        id: Uuid,
        patch: &EventPatch,
    ) -> Result<Option<Event>, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/events/{id}")))
            .json(patch)
            .send()
            .await?;
        decode(response).await
    }

    async fn delete_event(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/events/{id}")))
            .send()
            .await?;
        decode(response).await
    }

    async fn enroll_volunteer(&self, id: Uuid) -> Result<Event, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/events/{id}/volunteers")))
            .send()
            .await?;
        decode(response).await
    }

    async fn list_trainings(&self) -> Result<Vec<Training>, ClientError> {
        decode(self.client.get(self.url("/trainings")).send().await?).await
    }

    async fn create_training(&self, draft: &NewTraining) -> Result<Training, ClientError> {
        let response = self
            .client
            .post(self.url("/trainings"))
            .json(draft)
            .send()
            .await?;
        decode(response).await
    }

    async fn update_training(
        &self,
        id: Uuid,
        patch: &TrainingPatch,
    ) -> Result<Option<Training>, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/trainings/{id}")))
            .json(patch)
            .send()
            .await?;
        decode(response).await
    }

    async fn delete_training(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/trainings/{id}")))
            .send()
            .await?;
        decode(response).await
    }

    async fn enroll_participant(&self, id: Uuid) -> Result<Training, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/trainings/{id}/participants")))
            .send()
            .await?;
        decode(response).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<MessageResponse, ClientError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .client
            .post(self.url("/admin/login"))
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }
}
