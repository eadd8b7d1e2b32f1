use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CopyService;
use crate::models::{
    ApiResponse, ErrorCode,
    copies::requests::{AssignArbitratorRequest, AssignTeachersRequest},
};
use crate::services::grading_error_response;

pub async fn assign_teachers(
    service: &CopyService,
    assign_data: AssignTeachersRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let engine = service.get_engine(request);

    match engine
        .assign_primary(
            assign_data.copy_id,
            assign_data.teacher1_id,
            assign_data.teacher2_id,
        )
        .await
    {
        Ok(copy) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            copy,
            "Teachers assigned successfully",
        ))),
        Err(e) => Ok(grading_error_response(
            &e,
            ErrorCode::CopyNotFound,
            ErrorCode::CopyNotEligible,
        )),
    }
}

pub async fn assign_arbitrator(
    service: &CopyService,
    assign_data: AssignArbitratorRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let engine = service.get_engine(request);

    match engine
        .assign_arbitrator(assign_data.copy_id, assign_data.teacher3_id)
        .await
    {
        Ok(copy) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            copy,
            "Arbitrator assigned successfully",
        ))),
        Err(e) => Ok(grading_error_response(
            &e,
            ErrorCode::CopyNotFound,
            ErrorCode::CopyNotEligible,
        )),
    }
}
