pub mod assign;
pub mod create;
pub mod list;
pub mod publish;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::grading::GradingEngine;
use crate::models::copies::requests::{
    AssignArbitratorRequest, AssignTeachersRequest, CopyListQuery, CreateCopyRequest,
};

pub struct CopyService {
    engine: Option<GradingEngine>,
}

impl CopyService {
    pub fn new_lazy() -> Self {
        Self { engine: None }
    }

    pub(crate) fn get_engine(&self, request: &HttpRequest) -> GradingEngine {
        match &self.engine {
            Some(engine) => engine.clone(),
            None => super::engine_from_request(request),
        }
    }

    // 登记答卷
    pub async fn create_copy(
        &self,
        copy_data: CreateCopyRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_copy(self, copy_data, request).await
    }

    // 按状态列出答卷
    pub async fn list_copies(
        &self,
        query: CopyListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_copies(self, query, request).await
    }

    // 可分配的教师
    pub async fn list_teachers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_teachers(self, request).await
    }

    // 分配初评教师
    pub async fn assign_teachers(
        &self,
        assign_data: AssignTeachersRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_teachers(self, assign_data, request).await
    }

    // 分配仲裁教师
    pub async fn assign_arbitrator(
        &self,
        assign_data: AssignArbitratorRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_arbitrator(self, assign_data, request).await
    }

    // 发布成绩
    pub async fn publish_results(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        publish::publish_results(self, request).await
    }
}
