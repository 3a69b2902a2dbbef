//! REST client
//!
//! Thin wrapper over `reqwest` that knows the API's URL layout, attaches
//! the session token and turns every failure into an [`ApiError`]. It owns
//! no entity state.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::auth::{AuthSession, Credentials, LoginResponse};
use super::config::ApiConfig;
use super::error::{ApiError, ApiResult};
use crate::domain::{month_param, CategoryCounts, Entity, OperationHours, RecordId};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    auth: AuthSession,
}

impl ApiClient {
    pub fn new(config: ApiConfig, auth: AuthSession) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            auth,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    fn collection_url<T: Entity>(&self) -> String {
        self.config.url(T::COLLECTION)
    }

    fn record_url<T: Entity>(&self, id: &RecordId) -> String {
        let id = utf8_percent_encode(id.as_str(), NON_ALPHANUMERIC);
        self.config.url(&format!("{}/{}", T::COLLECTION, id))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.auth.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and return the body of a 2xx response
    async fn send(&self, builder: RequestBuilder) -> ApiResult<String> {
        let response = builder.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::status(status.as_u16(), error_message(status, &body)))
        }
    }

    async fn get_json<R: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<R> {
        let body = self.send(builder).await?;
        if body.trim().is_empty() {
            return Err(ApiError::EmptyBody);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// `GET /<collection>`
    pub async fn list<T: Entity>(&self) -> ApiResult<Vec<T>> {
        let url = self.collection_url::<T>();
        log::debug!("GET {url}");
        self.get_json(self.request(Method::GET, &url)).await
    }

    /// `POST /<collection>`; `Some` when the server echoed the new record
    pub async fn create<T: Entity>(&self, payload: &T::Payload) -> ApiResult<Option<T>> {
        let url = self.collection_url::<T>();
        log::debug!("POST {url}");
        let body = self.send(self.request(Method::POST, &url).json(payload)).await?;
        Ok(echoed_record(&body))
    }

    /// `PUT /<collection>/<id>`; `Some` when the server echoed the record
    pub async fn update<T: Entity>(&self, id: &RecordId, payload: &T::Payload) -> ApiResult<Option<T>> {
        let url = self.record_url::<T>(id);
        log::debug!("PUT {url}");
        let body = self.send(self.request(Method::PUT, &url).json(payload)).await?;
        Ok(echoed_record(&body))
    }

    /// `DELETE /<collection>/<id>`
    pub async fn delete<T: Entity>(&self, id: &RecordId) -> ApiResult<()> {
        let url = self.record_url::<T>(id);
        log::debug!("DELETE {url}");
        self.send(self.request(Method::DELETE, &url)).await.map(|_| ())
    }

    /// `GET /dashboard/counts`
    pub async fn dashboard_counts(&self) -> ApiResult<CategoryCounts> {
        let url = self.config.url("dashboard/counts");
        self.get_json(self.request(Method::GET, &url)).await
    }

    /// `GET /dashboard/horas-operacoes?mes=MM`
    pub async fn operation_hours(&self, month: u32) -> ApiResult<Vec<OperationHours>> {
        let url = self.config.url("dashboard/horas-operacoes");
        let builder = self.request(Method::GET, &url).query(&[("mes", month_param(month))]);
        self.get_json(builder).await
    }

    /// `POST /login`; stores the returned token in the session
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<()> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(ApiError::Invalid("Informe e-mail e senha".into()));
        }
        let url = self.config.url("login");
        let response: LoginResponse = self.post_json(&url, credentials).await?;
        match response.token.filter(|t| !t.is_empty()) {
            Some(token) => {
                self.auth.sign_in(&token);
                Ok(())
            }
            None => Err(ApiError::Decode(
                response.message.unwrap_or_else(|| "Resposta sem token".into()),
            )),
        }
    }

    pub fn logout(&self) {
        self.auth.sign_out();
    }

    async fn post_json<B: Serialize + ?Sized, R: DeserializeOwned>(&self, url: &str, body: &B) -> ApiResult<R> {
        self.get_json(self.request(Method::POST, url).json(body)).await
    }
}

/// Record echoed in a POST/PUT response, if the body is one
fn echoed_record<T: Entity>(body: &str) -> Option<T> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<T>(body) {
        Ok(record) if !record.id().is_empty() => Some(record),
        Ok(_) => None,
        Err(e) => {
            log::debug!("write response is not a {} record: {e}", T::COLLECTION);
            None
        }
    }
}

/// Message for a non-2xx response: the body's `message`/`error` field,
/// else the raw body, else the status reason
fn error_message(status: StatusCode, body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error).filter(|m| !m.is_empty()) {
            return message;
        }
    }
    let body = body.trim();
    if !body.is_empty() && body.len() <= 200 && !body.starts_with('<') {
        return body.to_string();
    }
    status.canonical_reason().unwrap_or("Erro desconhecido").to_string()
}
