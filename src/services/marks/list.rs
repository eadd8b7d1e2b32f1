use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarkService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, copies::responses::TeacherCopyListResponse};
use crate::services::grading_error_response;

pub async fn list_assigned(
    service: &MarkService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(teacher_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let engine = service.get_engine(request);

    match engine.copies_for_teacher(teacher_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeacherCopyListResponse { items },
            "Assigned copies retrieved successfully",
        ))),
        Err(e) => Ok(grading_error_response(
            &e,
            ErrorCode::CopyNotFound,
            ErrorCode::CopyNotEligible,
        )),
    }
}
