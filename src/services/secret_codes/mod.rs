pub mod assign;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::grading::GradingEngine;

pub struct SecretCodeService {
    engine: Option<GradingEngine>,
}

impl SecretCodeService {
    pub fn new_lazy() -> Self {
        Self { engine: None }
    }

    pub(crate) fn get_engine(&self, request: &HttpRequest) -> GradingEngine {
        match &self.engine {
            Some(engine) => engine.clone(),
            None => super::engine_from_request(request),
        }
    }

    // 已发放的匿名码
    pub async fn list_codes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_codes(self, request).await
    }

    // 尚未发放匿名码的考生
    pub async fn list_pending_candidates(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_pending_candidates(self, request).await
    }

    // 为单个考生发放
    pub async fn assign_code(
        &self,
        candidate_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_code(self, candidate_id, request).await
    }

    // 为全部考生发放
    pub async fn assign_all(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        assign::assign_all(self, request).await
    }
}
