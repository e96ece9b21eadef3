use utoipa::OpenApi;
use zipdeploy_core::models::DeploymentResponse;

use crate::error::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Zipdeploy API",
        description = "Upload a ZIP archive and deploy it as a static site"
    ),
    paths(crate::handlers::deploy::deploy_project),
    components(schemas(DeploymentResponse, ErrorResponse)),
    tags((name = "deployments", description = "Archive deployments"))
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
