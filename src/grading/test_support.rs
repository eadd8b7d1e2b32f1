//! 引擎测试夹具：内存 SQLite + 记录型通知

use std::sync::Arc;

use super::GradingEngine;
use crate::config::GradingConfig;
use crate::models::{
    copies::entities::ExamCopy,
    modules::{entities::Module, requests::CreateModuleRequest},
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};
use crate::notifications::{Notifier, testing::RecordingNotifier};
use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

pub struct Fixture {
    pub storage: Arc<dyn Storage>,
    pub notifier: Arc<RecordingNotifier>,
    pub engine: GradingEngine,
    pub candidate: User,
    pub teacher1: User,
    pub teacher2: User,
    pub teacher3: User,
    pub module_a: Module,
    pub module_b: Module,
}

impl Fixture {
    pub async fn new() -> Self {
        let storage: Arc<dyn Storage> = Arc::new(
            SeaOrmStorage::connect("sqlite::memory:", 1, 10)
                .await
                .unwrap(),
        );
        let notifier = Arc::new(RecordingNotifier::default());
        let engine = GradingEngine::new(
            storage.clone(),
            notifier.clone() as Arc<dyn Notifier>,
            GradingConfig::default(),
        );

        let candidate = create_user(&storage, "cand1", UserRole::Candidate).await;
        let teacher1 = create_user(&storage, "teacher1", UserRole::Teacher).await;
        let teacher2 = create_user(&storage, "teacher2", UserRole::Teacher).await;
        let teacher3 = create_user(&storage, "teacher3", UserRole::Teacher).await;
        let module_a = create_module(&storage, "Algorithmique").await;
        let module_b = create_module(&storage, "Systemes").await;

        Self {
            storage,
            notifier,
            engine,
            candidate,
            teacher1,
            teacher2,
            teacher3,
            module_a,
            module_b,
        }
    }

    /// 同一存储上换一个通知实现
    pub fn engine_with(&self, notifier: Arc<dyn Notifier>) -> GradingEngine {
        GradingEngine::new(self.storage.clone(), notifier, GradingConfig::default())
    }

    pub async fn add_user(&self, username: &str, role: UserRole) -> User {
        create_user(&self.storage, username, role).await
    }

    pub async fn add_copy(&self, candidate: &User, module: &Module) -> ExamCopy {
        self.storage
            .create_copy(candidate.id, module.id)
            .await
            .unwrap()
    }

    pub async fn copy(&self, copy_id: i64) -> Option<ExamCopy> {
        self.storage.get_copy_by_id(copy_id).await.unwrap()
    }

    /// 登记并分配好两位初评教师的答卷
    pub async fn assigned_copy(&self, candidate: &User, module: &Module) -> ExamCopy {
        let copy = self.add_copy(candidate, module).await;
        self.engine
            .assign_primary(copy.id, self.teacher1.id, self.teacher2.id)
            .await
            .unwrap()
    }
}

async fn create_user(storage: &Arc<dyn Storage>, username: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "not-a-real-hash".to_string(),
            role,
            display_name: None,
        })
        .await
        .unwrap()
}

async fn create_module(storage: &Arc<dyn Storage>, name: &str) -> Module {
    storage
        .create_module(CreateModuleRequest {
            name: name.to_string(),
            description: None,
        })
        .await
        .unwrap()
}
