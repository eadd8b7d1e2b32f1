pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::modules::requests::CreateModuleRequest;
use crate::storage::Storage;

pub struct ModuleService {
    storage: Option<Arc<dyn Storage>>,
}

impl ModuleService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建科目
    pub async fn create_module(
        &self,
        module_data: CreateModuleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_module(self, module_data, request).await
    }

    // 科目列表
    pub async fn list_modules(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_modules(self, request).await
    }
}
