use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::copies::requests::{
    AssignArbitratorRequest, AssignTeachersRequest, CopyListQuery, CreateCopyRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CopyService;

static COPY_SERVICE: Lazy<CopyService> = Lazy::new(CopyService::new_lazy);

pub async fn create_copy(
    req: HttpRequest,
    copy_data: web::Json<CreateCopyRequest>,
) -> ActixResult<HttpResponse> {
    COPY_SERVICE.create_copy(copy_data.into_inner(), &req).await
}

pub async fn list_copies(
    req: HttpRequest,
    query: web::Query<CopyListQuery>,
) -> ActixResult<HttpResponse> {
    COPY_SERVICE.list_copies(query.into_inner(), &req).await
}

pub async fn list_teachers(req: HttpRequest) -> ActixResult<HttpResponse> {
    COPY_SERVICE.list_teachers(&req).await
}

pub async fn assign_teachers(
    req: HttpRequest,
    assign_data: web::Json<AssignTeachersRequest>,
) -> ActixResult<HttpResponse> {
    COPY_SERVICE
        .assign_teachers(assign_data.into_inner(), &req)
        .await
}

pub async fn assign_arbitrator(
    req: HttpRequest,
    assign_data: web::Json<AssignArbitratorRequest>,
) -> ActixResult<HttpResponse> {
    COPY_SERVICE
        .assign_arbitrator(assign_data.into_inner(), &req)
        .await
}

pub async fn publish_results(req: HttpRequest) -> ActixResult<HttpResponse> {
    COPY_SERVICE.publish_results(&req).await
}

// 配置路由
pub fn configure_copies_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/copies")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::post()
                            .to(create_copy)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::copy_registrar_roles(),
                            )),
                    )
                    .route(
                        web::get()
                            .to(list_copies)
                            .wrap(middlewares::RequireRole::new_any(UserRole::president_roles())),
                    ),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::president_roles()))
                    .route("/teachers", web::get().to(list_teachers))
                    .route("/assign", web::post().to(assign_teachers))
                    .route("/arbitrator", web::post().to(assign_arbitrator))
                    .service(
                        web::resource("/publish")
                            .wrap(middlewares::RateLimit::publish())
                            .route(web::post().to(publish_results)),
                    ),
            ),
    );
}
