use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::SecretCodeService;
use crate::utils::SafeIDI64;

static SECRET_CODE_SERVICE: Lazy<SecretCodeService> = Lazy::new(SecretCodeService::new_lazy);

pub async fn list_codes(req: HttpRequest) -> ActixResult<HttpResponse> {
    SECRET_CODE_SERVICE.list_codes(&req).await
}

pub async fn list_pending_candidates(req: HttpRequest) -> ActixResult<HttpResponse> {
    SECRET_CODE_SERVICE.list_pending_candidates(&req).await
}

pub async fn assign_code(req: HttpRequest, candidate_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SECRET_CODE_SERVICE.assign_code(candidate_id.0, &req).await
}

pub async fn assign_all(req: HttpRequest) -> ActixResult<HttpResponse> {
    SECRET_CODE_SERVICE.assign_all(&req).await
}

// 配置路由
pub fn configure_secret_codes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/secret-codes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::dean_roles()))
                    .route("", web::get().to(list_codes))
                    .route("/candidates", web::get().to(list_pending_candidates))
                    .route("/assign-all", web::post().to(assign_all))
                    .route("/assign/{candidate_id}", web::post().to(assign_code)),
            ),
    );
}
