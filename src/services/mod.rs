pub mod auth;
pub mod copies;
pub mod marks;
pub mod modules;
pub mod results;
pub mod secret_codes;
pub mod users;

pub use auth::AuthService;
pub use copies::CopyService;
pub use marks::MarkService;
pub use modules::ModuleService;
pub use results::ResultService;
pub use secret_codes::SecretCodeService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, http::StatusCode};
use std::sync::Arc;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::errors::GradingError;
use crate::grading::GradingEngine;
use crate::models::{ApiResponse, ErrorCode};
use crate::notifications::Notifier;
use crate::storage::Storage;

/// 用 app_data 中的存储与通知实现构造阅卷引擎
pub(crate) fn engine_from_request(request: &HttpRequest) -> GradingEngine {
    let storage = request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();
    let notifier = request
        .app_data::<actix_web::web::Data<Arc<dyn Notifier>>>()
        .expect("Notifier not found in app data")
        .get_ref()
        .clone();

    GradingEngine::new(storage, notifier, AppConfig::get().grading.clone())
}

/// 将引擎错误映射为 HTTP 响应
///
/// `not_found` 与 `not_eligible` 由调用方给出业务错误码，其余错误使用通用错误码。
pub(crate) fn grading_error_response(
    err: &GradingError,
    not_found: ErrorCode,
    not_eligible: ErrorCode,
) -> HttpResponse {
    let (status, code) = match err {
        GradingError::NotFound(_) => (StatusCode::NOT_FOUND, not_found),
        GradingError::NotEligible(_) => (StatusCode::CONFLICT, not_eligible),
        GradingError::Conflict(_) => (
            StatusCode::CONFLICT,
            ErrorCode::CopyConcurrentModification,
        ),
        GradingError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest),
        GradingError::Authentication(_) => (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized),
        GradingError::Authorization(_) => (StatusCode::FORBIDDEN, ErrorCode::Forbidden),
        GradingError::ExhaustedCodeSpace(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::SecretCodeSpaceExhausted,
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
        ),
    };

    if status.is_server_error() {
        error!("{}", err);
    } else {
        info!("Request rejected: {}", err);
    }

    HttpResponse::build(status).json(ApiResponse::error_empty(code, err.message()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grading_errors_map_to_status() {
        let cases = [
            (GradingError::not_found("x"), StatusCode::NOT_FOUND),
            (GradingError::not_eligible("x"), StatusCode::CONFLICT),
            (GradingError::conflict("x"), StatusCode::CONFLICT),
            (GradingError::validation("x"), StatusCode::BAD_REQUEST),
            (GradingError::authorization("x"), StatusCode::FORBIDDEN),
            (
                GradingError::exhausted_code_space("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                GradingError::database_operation("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let resp = grading_error_response(&err, ErrorCode::NotFound, ErrorCode::Conflict);
            assert_eq!(resp.status(), status, "{err}");
        }
    }
}
