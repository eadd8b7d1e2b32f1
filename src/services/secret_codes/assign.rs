use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SecretCodeService;
use crate::models::{ApiResponse, ErrorCode, secret_codes::responses::IssuedCodesResponse};
use crate::services::grading_error_response;

pub async fn assign_code(
    service: &SecretCodeService,
    candidate_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let engine = service.get_engine(request);

    match engine.issue_code(candidate_id).await {
        Ok(code) => Ok(HttpResponse::Created().json(ApiResponse::success(
            code,
            "Secret code assigned successfully",
        ))),
        Err(e) => Ok(grading_error_response(
            &e,
            ErrorCode::UserNotFound,
            ErrorCode::SecretCodeAlreadyAssigned,
        )),
    }
}

pub async fn assign_all(
    service: &SecretCodeService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let engine = service.get_engine(request);

    match engine.issue_codes_for_all().await {
        Ok(items) => {
            let message = if items.is_empty() {
                "Every candidate already has a secret code"
            } else {
                "Secret codes assigned successfully"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                IssuedCodesResponse {
                    issued: items.len(),
                    items,
                },
                message,
            )))
        }
        Err(e) => Ok(grading_error_response(
            &e,
            ErrorCode::UserNotFound,
            ErrorCode::SecretCodeAlreadyAssigned,
        )),
    }
}
