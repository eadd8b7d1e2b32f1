use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SecretCodeService;
use crate::models::{
    ApiResponse, ErrorCode,
    secret_codes::responses::{PendingCandidatesResponse, SecretCodeListResponse},
    users::responses::UserSummary,
};
use crate::services::grading_error_response;

pub async fn list_codes(
    service: &SecretCodeService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let engine = service.get_engine(request);

    match engine.issued_codes().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SecretCodeListResponse { items },
            "Secret codes retrieved successfully",
        ))),
        Err(e) => Ok(grading_error_response(
            &e,
            ErrorCode::NotFound,
            ErrorCode::Conflict,
        )),
    }
}

pub async fn list_pending_candidates(
    service: &SecretCodeService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let engine = service.get_engine(request);

    match engine.candidates_without_code().await {
        Ok(users) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PendingCandidatesResponse {
                items: users.iter().map(UserSummary::from).collect(),
            },
            "Candidates without secret code retrieved successfully",
        ))),
        Err(e) => Ok(grading_error_response(
            &e,
            ErrorCode::NotFound,
            ErrorCode::Conflict,
        )),
    }
}
