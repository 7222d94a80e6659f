//! Trait abstraction for the API client to enable mocking in tests

use super::ApiResult;
use crate::state::{
    Form, FormSummary, HealthStatus, NewForm, NewProject, NewSubmission, NewUser, Project,
    Submission, User,
};
use async_trait::async_trait;

/// Operations against the forms REST API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClientTrait: Send + Sync {
    /// Probe `GET /health`
    async fn health(&self) -> ApiResult<HealthStatus>;

    /// List all projects
    async fn list_projects(&self) -> ApiResult<Vec<Project>>;

    /// Create a project
    async fn create_project(&self, project: &NewProject) -> ApiResult<()>;

    /// Delete a project
    async fn delete_project(&self, id: &str) -> ApiResult<()>;

    /// List the forms belonging to one project
    async fn list_project_forms(&self, project_id: &str) -> ApiResult<Vec<FormSummary>>;

    /// List all users (admin only)
    async fn list_users(&self) -> ApiResult<Vec<User>>;

    /// Create a user (admin only)
    async fn create_user(&self, user: &NewUser) -> ApiResult<()>;

    /// Delete a user (admin only)
    async fn delete_user(&self, id: &str) -> ApiResult<()>;

    /// List all forms
    async fn list_forms(&self) -> ApiResult<Vec<FormSummary>>;

    /// Fetch one form with its full field schema
    async fn get_form(&self, id: &str) -> ApiResult<Form>;

    /// Create a form
    async fn create_form(&self, form: &NewForm) -> ApiResult<()>;

    /// Delete a form
    async fn delete_form(&self, id: &str) -> ApiResult<()>;

    /// List submissions visible to the session
    async fn list_submissions(&self) -> ApiResult<Vec<Submission>>;

    /// Fetch one submission with its answers
    async fn get_submission(&self, id: &str) -> ApiResult<Submission>;

    /// Submit a filled-in form
    async fn create_submission(&self, submission: &NewSubmission) -> ApiResult<()>;
}
