use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarkService;
use crate::errors::GradingError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, copies::requests::MarkSubmission};
use crate::services::grading_error_response;

pub async fn submit_marks(
    service: &MarkService,
    submissions: Vec<MarkSubmission>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(grader_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let engine = service.get_engine(request);

    match engine.submit_marks(grader_id, &submissions).await {
        Ok(response) => {
            let message = if response.updated > 0 {
                format!("Marks submitted successfully for {} copy(ies)", response.updated)
            } else {
                "No marks were updated".to_string()
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, message)))
        }
        Err(e @ GradingError::Validation(_)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::MarkInvalid, e.message()))),
        Err(e) => Ok(grading_error_response(
            &e,
            ErrorCode::CopyNotFound,
            ErrorCode::CopyNotEligible,
        )),
    }
}
