use std::sync::Arc;

use crate::models::{
    copies::entities::{ExamCopy, MarkSlot},
    modules::{entities::Module, requests::CreateModuleRequest},
    results::entities::CandidateResult,
    secret_codes::entities::SecretCode,
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段需已是哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 按角色列出全部用户
    async fn list_users_by_role(&self, role: UserRole) -> Result<Vec<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 科目管理方法
    async fn create_module(&self, module: CreateModuleRequest) -> Result<Module>;
    async fn get_module_by_id(&self, id: i64) -> Result<Option<Module>>;
    async fn list_modules(&self) -> Result<Vec<Module>>;

    /// 匿名码管理方法
    // 保存匿名码，内容或考生重复时返回错误
    async fn create_secret_code(&self, candidate_id: i64, content: &str) -> Result<SecretCode>;
    async fn get_secret_code_by_candidate(&self, candidate_id: i64) -> Result<Option<SecretCode>>;
    async fn list_secret_codes(&self) -> Result<Vec<SecretCode>>;

    /// 答卷管理方法
    async fn create_copy(&self, candidate_id: i64, module_id: i64) -> Result<ExamCopy>;
    async fn get_copy_by_id(&self, id: i64) -> Result<Option<ExamCopy>>;
    async fn list_copies(&self) -> Result<Vec<ExamCopy>>;
    async fn list_copies_by_candidate(&self, candidate_id: i64) -> Result<Vec<ExamCopy>>;
    // 列出教师参与阅卷的答卷（teacher1/2/3 任一）
    async fn list_copies_by_teacher(&self, teacher_id: i64) -> Result<Vec<ExamCopy>>;
    // 以下三个写操作均以 version 做比较交换，版本不符时返回 false
    async fn assign_primary_teachers(
        &self,
        copy_id: i64,
        teacher1_id: i64,
        teacher2_id: i64,
        expected_version: i64,
    ) -> Result<bool>;
    async fn assign_arbitrator(
        &self,
        copy_id: i64,
        teacher3_id: i64,
        expected_version: i64,
    ) -> Result<bool>;
    async fn fill_mark_slot(
        &self,
        copy_id: i64,
        slot: MarkSlot,
        mark: f64,
        grader_id: i64,
        expected_version: i64,
    ) -> Result<bool>;

    /// 成绩管理方法
    async fn get_result_by_candidate(&self, candidate_id: i64) -> Result<Option<CandidateResult>>;
    // 按成绩从高到低列出
    async fn list_results(&self) -> Result<Vec<CandidateResult>>;
    // 在同一事务中写入成绩并删除该考生的答卷；
    // 已有成绩或答卷版本变化时回滚并返回 None
    async fn publish_candidate_result(
        &self,
        candidate_id: i64,
        value: f64,
        accepted: bool,
        copies: &[(i64, i64)],
    ) -> Result<Option<CandidateResult>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
