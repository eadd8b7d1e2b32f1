pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::grading::GradingEngine;
use crate::models::copies::requests::MarkSubmission;

pub struct MarkService {
    engine: Option<GradingEngine>,
}

impl MarkService {
    pub fn new_lazy() -> Self {
        Self { engine: None }
    }

    pub(crate) fn get_engine(&self, request: &HttpRequest) -> GradingEngine {
        match &self.engine {
            Some(engine) => engine.clone(),
            None => super::engine_from_request(request),
        }
    }

    // 当前教师需要批阅的答卷
    pub async fn list_assigned(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_assigned(self, request).await
    }

    // 批量提交分数
    pub async fn submit_marks(
        &self,
        submissions: Vec<MarkSubmission>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_marks(self, submissions, request).await
    }
}
