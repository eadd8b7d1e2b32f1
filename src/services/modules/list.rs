use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ModuleService;
use crate::models::{ApiResponse, ErrorCode, modules::responses::ModuleListResponse};

pub async fn list_modules(
    service: &ModuleService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_modules().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ModuleListResponse { items },
            "Module list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve module list: {e}"),
            )),
        ),
    }
}
