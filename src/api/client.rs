//! HTTP client for the forms REST API

use super::{ApiClientTrait, ApiError, ApiResult};
use crate::state::{
    Form, FormSummary, HealthStatus, NewForm, NewProject, NewSubmission, NewUser, Project,
    Submission, User,
};
use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

/// Default API address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:10000";

/// Error body the server sends with non-2xx responses
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the forms REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    session_cookie: Option<String>,
    client: ReqwestClient,
}

impl ApiClient {
    /// Create a client for `base_url`. The session cookie, when given, is
    /// sent verbatim as the `Cookie` header of every request.
    pub fn new(base_url: &str, session_cookie: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie: session_cookie.filter(|c| !c.trim().is_empty()),
            client: ReqwestClient::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request with the session cookie attached
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "api request");
        let mut req = self.client.request(method, url);
        if let Some(ref cookie) = self.session_cookie {
            req = req.header(header::COOKIE, cookie);
        }
        req
    }

    /// Send a request and turn non-2xx statuses into [`ApiError::Server`]
    async fn send(&self, req: RequestBuilder) -> ApiResult<Response> {
        let response = req.send().await.map_err(|e| {
            warn!(error = %e, "api request failed");
            ApiError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // The body may be JSON with an `error` field, or an HTML error page
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .and_then(|body| body.error);
        warn!(%status, message = message.as_deref().unwrap_or(""), "api returned error");
        Err(ApiError::Server { status, message })
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(path, error = %e, "unexpected response body");
            ApiError::from(e)
        })
    }

    async fn post<B: serde::Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        self.send(self.request(Method::POST, path).json(body))
            .await
            .map(|_| ())
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send(self.request(Method::DELETE, path))
            .await
            .map(|_| ())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, None)
    }
}

#[async_trait]
impl ApiClientTrait for ApiClient {
    async fn health(&self) -> ApiResult<HealthStatus> {
        self.fetch("/health").await
    }

    async fn list_projects(&self) -> ApiResult<Vec<Project>> {
        self.fetch("/api/projects").await
    }

    async fn create_project(&self, project: &NewProject) -> ApiResult<()> {
        self.post("/api/projects", project).await
    }

    async fn delete_project(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/api/projects/{}", id)).await
    }

    async fn list_project_forms(&self, project_id: &str) -> ApiResult<Vec<FormSummary>> {
        self.fetch(&format!("/api/projects/{}/forms", project_id))
            .await
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.fetch("/api/users").await
    }

    async fn create_user(&self, user: &NewUser) -> ApiResult<()> {
        self.post("/api/users", user).await
    }

    async fn delete_user(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/api/users/{}", id)).await
    }

    async fn list_forms(&self) -> ApiResult<Vec<FormSummary>> {
        self.fetch("/api/forms").await
    }

    async fn get_form(&self, id: &str) -> ApiResult<Form> {
        self.fetch(&format!("/api/forms/{}", id)).await
    }

    async fn create_form(&self, form: &NewForm) -> ApiResult<()> {
        self.post("/api/forms", form).await
    }

    async fn delete_form(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/api/forms/{}", id)).await
    }

    async fn list_submissions(&self) -> ApiResult<Vec<Submission>> {
        self.fetch("/api/submissions").await
    }

    async fn get_submission(&self, id: &str) -> ApiResult<Submission> {
        self.fetch(&format!("/api/submissions/{}", id)).await
    }

    async fn create_submission(&self, submission: &NewSubmission) -> ApiResult<()> {
        self.post("/api/submissions", submission).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:10000/", None);
        assert_eq!(client.base_url(), "http://localhost:10000");
    }

    #[test]
    fn test_blank_cookie_is_dropped() {
        let client = ApiClient::new(DEFAULT_BASE_URL, Some("  ".to_string()));
        assert!(client.session_cookie.is_none());
    }

    #[test]
    fn test_default_points_at_local_server() {
        assert_eq!(ApiClient::default().base_url(), DEFAULT_BASE_URL);
    }
}
