use crate::auth::CallerIdentity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_deploy_form;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use std::sync::Arc;
use zipdeploy_core::models::{DeploymentResponse, MISSING_UPLOAD_MESSAGE};
use zipdeploy_core::AppError;

#[utoipa::path(
    post,
    path = "/api/deploy",
    tag = "deployments",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Fields: `zipFile` (ZIP archive) and `projectName` (text)"),
    responses(
        (status = 200, description = "Deployment created", body = DeploymentResponse),
        (status = 400, description = "Missing input, corrupt or empty archive", body = ErrorResponse),
        (status = 401, description = "No caller identity", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 413, description = "Archive too large", body = ErrorResponse),
        (status = 500, description = "Missing credential or internal error", body = ErrorResponse),
        (status = 502, description = "Deployment rejected by the platform", body = ErrorResponse)
    )
)]
pub async fn deploy_project(
    State(state): State<Arc<AppState>>,
    identity: Result<CallerIdentity, HttpAppError>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<DeploymentResponse>, HttpAppError> {
    // A body that is not multipart at all carries neither field
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(rejection = %rejection, "Request body is not multipart");
        AppError::InvalidInput(MISSING_UPLOAD_MESSAGE.to_string())
    })?;
    let form = extract_deploy_form(multipart).await?;
    tracing::info!(
        project.name = ?form.project_name,
        archive.filename = ?form.archive_filename,
        archive.bytes = form.archive.as_ref().map(|a| a.len()),
        "Deploy submission received"
    );

    // An absent identity is reported by the pipeline, after the inputs are checked
    let owner_id = identity.map(|i| i.owner_id).unwrap_or_default();
    let outcome = state
        .pipeline
        .run(form.archive, form.project_name, &owner_id)
        .await?;

    tracing::info!(
        url = %outcome.deployment.url,
        final_stage = %outcome.final_stage(),
        "Deployment finished"
    );

    Ok(Json(DeploymentResponse::from(&outcome.deployment)))
}
