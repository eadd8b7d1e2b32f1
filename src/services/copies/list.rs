use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CopyService;
use crate::models::{
    ApiResponse, ErrorCode,
    copies::{requests::CopyListQuery, responses::CopyListResponse},
    users::{
        entities::UserRole,
        responses::{TeacherListResponse, UserSummary},
    },
};
use crate::services::grading_error_response;

pub async fn list_copies(
    service: &CopyService,
    query: CopyListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let engine = service.get_engine(request);

    match engine.copies_in_state(query.state).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CopyListResponse { items },
            "Copy list retrieved successfully",
        ))),
        Err(e) => Ok(grading_error_response(
            &e,
            ErrorCode::CopyNotFound,
            ErrorCode::CopyNotEligible,
        )),
    }
}

pub async fn list_teachers(
    service: &CopyService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let engine = service.get_engine(request);

    match engine.storage().list_users_by_role(UserRole::Teacher).await {
        Ok(teachers) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeacherListResponse {
                items: teachers.iter().map(UserSummary::from).collect(),
            },
            "Teacher list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve teacher list: {e}"),
            )),
        ),
    }
}
