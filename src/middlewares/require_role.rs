/*!
 * 角色校验中间件
 *
 * 必须挂在 RequireJWT 之内，从请求扩展中读取已认证用户，
 * 用户角色属于给定角色集合之一即放行，否则返回 403。
 *
 * ```rust,ignore
 * web::scope("/api/v1/secret-codes")
 *     .wrap(RequireJWT)
 *     .service(
 *         web::scope("")
 *             .wrap(RequireRole::new_any(UserRole::dean_roles()))
 *             .route("", web::get().to(list_codes)),
 *     )
 * ```
 *
 * 同一资源不同方法需要不同角色时，用 `Route::wrap` 分别挂载。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed: Arc<[UserRole]>,
}

impl RequireRole {
    /// 任一角色即可访问
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed: roles.iter().map(|role| (*role).clone()).collect(),
        }
    }

    pub fn permits(&self, user: &User) -> bool {
        self.allowed.contains(&user.role)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            guard: self.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    guard: RequireRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let guard = self.guard.clone();

        Box::pin(async move {
            let user = req.extensions().get::<User>().cloned();

            let (status, code, message) = match user {
                Some(user) if guard.permits(&user) => {
                    return Ok(srv.call(req).await?.map_into_left_body());
                }
                Some(user) => {
                    info!(
                        "Role check denied user {} ({}) on {}, allowed: {:?}",
                        user.id,
                        user.role,
                        req.path(),
                        guard.allowed
                    );
                    (StatusCode::FORBIDDEN, ErrorCode::Forbidden, "Access denied.")
                }
                // RequireJWT 未挂载在外层
                None => {
                    info!("Role check on {} without an authenticated user", req.path());
                    (
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                }
            };

            Ok(req.into_response(
                create_error_response(status, code, message).map_into_right_body(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;

    fn user_with(role: UserRole) -> User {
        let now = chrono::Utc::now();
        User {
            id: 7,
            username: "someone".to_string(),
            email: "someone@example.com".to_string(),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_any_listed_role_is_permitted() {
        let guard = RequireRole::new_any(UserRole::result_reader_roles());
        assert!(guard.permits(&user_with(UserRole::Candidate)));
        assert!(guard.permits(&user_with(UserRole::CfdPresident)));
        assert!(!guard.permits(&user_with(UserRole::Teacher)));
    }

    #[test]
    fn test_dean_scope_rejects_president() {
        let guard = RequireRole::new_any(UserRole::dean_roles());
        assert!(guard.permits(&user_with(UserRole::Dean)));
        assert!(!guard.permits(&user_with(UserRole::CfdPresident)));
        assert!(!guard.permits(&user_with(UserRole::Admin)));
    }
}
