pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::grading::GradingEngine;

pub struct ResultService {
    engine: Option<GradingEngine>,
}

impl ResultService {
    pub fn new_lazy() -> Self {
        Self { engine: None }
    }

    pub(crate) fn get_engine(&self, request: &HttpRequest) -> GradingEngine {
        match &self.engine {
            Some(engine) => engine.clone(),
            None => super::engine_from_request(request),
        }
    }

    // 已发布成绩排名
    pub async fn list_results(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_results(self, request).await
    }
}
