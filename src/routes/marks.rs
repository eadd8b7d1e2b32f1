use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::copies::requests::MarkSubmission;
use crate::models::users::entities::UserRole;
use crate::services::MarkService;

static MARK_SERVICE: Lazy<MarkService> = Lazy::new(MarkService::new_lazy);

pub async fn list_assigned(req: HttpRequest) -> ActixResult<HttpResponse> {
    MARK_SERVICE.list_assigned(&req).await
}

pub async fn submit_marks(
    req: HttpRequest,
    submissions: web::Json<Vec<MarkSubmission>>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE
        .submit_marks(submissions.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_marks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/marks")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .service(
                        web::resource("")
                            .route(web::get().to(list_assigned))
                            .route(
                                web::post()
                                    .to(submit_marks)
                                    .wrap(middlewares::RateLimit::mark_submission()),
                            ),
                    ),
            ),
    );
}
