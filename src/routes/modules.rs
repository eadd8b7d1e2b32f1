use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::modules::requests::CreateModuleRequest;
use crate::models::users::entities::UserRole;
use crate::services::ModuleService;

static MODULE_SERVICE: Lazy<ModuleService> = Lazy::new(ModuleService::new_lazy);

pub async fn list_modules(req: HttpRequest) -> ActixResult<HttpResponse> {
    MODULE_SERVICE.list_modules(&req).await
}

pub async fn create_module(
    req: HttpRequest,
    module_data: web::Json<CreateModuleRequest>,
) -> ActixResult<HttpResponse> {
    MODULE_SERVICE
        .create_module(module_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_modules_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/modules")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_modules)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::copy_registrar_roles(),
                            )),
                    )
                    .route(
                        web::post()
                            .to(create_module)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
