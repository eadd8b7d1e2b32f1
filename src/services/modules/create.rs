use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ModuleService;
use crate::models::{ApiResponse, ErrorCode, modules::requests::CreateModuleRequest};
use crate::utils::is_unique_violation;
use crate::utils::validate::validate_module_name;

pub async fn create_module(
    service: &ModuleService,
    mut module_data: CreateModuleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    module_data.name = module_data.name.trim().to_string();
    if let Err(msg) = validate_module_name(&module_data.name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ModuleNameInvalid, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_module(module_data).await {
        Ok(module) => {
            info!("Module {} ({}) created", module.id, module.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(module, "科目创建成功")))
        }
        Err(e) if is_unique_violation(e.message()) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ModuleAlreadyExists,
                "Module name already exists",
            )))
        }
        Err(e) => {
            error!("Module creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Module creation failed: {e}"),
                )),
            )
        }
    }
}
