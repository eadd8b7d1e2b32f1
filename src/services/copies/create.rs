use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CopyService;
use crate::models::{ApiResponse, ErrorCode, copies::requests::CreateCopyRequest};
use crate::services::grading_error_response;

pub async fn create_copy(
    service: &CopyService,
    copy_data: CreateCopyRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let engine = service.get_engine(request);

    match engine
        .register_copy(copy_data.candidate_id, copy_data.module_id)
        .await
    {
        Ok(copy) => Ok(HttpResponse::Created().json(ApiResponse::success(
            copy,
            "Copy registered successfully",
        ))),
        Err(e) => Ok(grading_error_response(
            &e,
            ErrorCode::NotFound,
            ErrorCode::CopyNotEligible,
        )),
    }
}
