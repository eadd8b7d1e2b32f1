use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CopyService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::grading_error_response;

pub async fn publish_results(
    service: &CopyService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let engine = service.get_engine(request);

    match engine.publish().await {
        Ok(report) => {
            info!(
                "Results published by user {:?}: {} published, {} skipped, {} failed",
                RequireJWT::extract_user_id(request),
                report.published,
                report.skipped.len(),
                report.failed
            );
            let message = if report.published > 0 {
                "Results published successfully"
            } else {
                "No result was published"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(report, message)))
        }
        Err(e) => Ok(grading_error_response(
            &e,
            ErrorCode::ResultNotFound,
            ErrorCode::CopyNotEligible,
        )),
    }
}
