//! Multipart parsing for deploy submissions

use crate::constants::{ARCHIVE_FIELD, PROJECT_NAME_FIELD};
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use validator::Validate;
use zipdeploy_core::AppError;

/// Raw fields of a deploy submission. Presence is checked by the pipeline.
#[derive(Debug, Default, Validate)]
pub struct DeployForm {
    pub archive: Option<Bytes>,
    pub archive_filename: Option<String>,
    #[validate(length(max = 100, message = "Project name must be at most 100 characters"))]
    pub project_name: Option<String>,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Upload exceeds the allowed size: {}", err))
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err))
    }
}

/// Read `zipFile` and `projectName` out of the form; other fields are ignored.
/// Only one `zipFile` field is accepted.
pub async fn extract_deploy_form(mut multipart: Multipart) -> Result<DeployForm, AppError> {
    let mut form = DeployForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == ARCHIVE_FIELD {
            if form.archive.is_some() {
                return Err(AppError::InvalidInput(format!(
                    "Multiple {} fields are not allowed",
                    ARCHIVE_FIELD
                )));
            }
            form.archive_filename = field.file_name().map(|s| s.to_string());
            form.archive = Some(field.bytes().await.map_err(multipart_error)?);
        } else if field_name == PROJECT_NAME_FIELD {
            let text = field.text().await.map_err(multipart_error)?;
            form.project_name = Some(text.trim().to_string());
        }
    }

    form.validate()?;
    Ok(form)
}
