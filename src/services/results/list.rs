use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::models::{ApiResponse, ErrorCode, results::responses::ResultListResponse};
use crate::services::grading_error_response;

pub async fn list_results(
    service: &ResultService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let engine = service.get_engine(request);

    match engine.ranked_results().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ResultListResponse { items },
            "Results retrieved successfully",
        ))),
        Err(e) => Ok(grading_error_response(
            &e,
            ErrorCode::ResultNotFound,
            ErrorCode::Conflict,
        )),
    }
}
