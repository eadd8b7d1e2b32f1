//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod copies;
mod modules;
mod results;
mod secret_codes;
mod users;

use crate::config::AppConfig;
use crate::errors::{GradingError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| GradingError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| GradingError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        // 内存库的每个连接都是独立数据库，只能保留一个常驻连接
        let in_memory = url.contains(":memory:");
        let max_connections = if in_memory { 1 } else { pool_size.max(1) };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(if in_memory {
                None
            } else {
                Some(Duration::from_secs(300))
            })
            .max_lifetime(if in_memory {
                None
            } else {
                Some(Duration::from_secs(1800))
            })
            .connect_with(opt)
            .await
            .map_err(|e| GradingError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| GradingError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(GradingError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn list_users_by_role(&self, role: UserRole) -> Result<Vec<User>> {
        self.list_users_by_role_impl(role).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 科目模块
    async fn create_module(&self, module: CreateModuleRequest) -> Result<Module> {
        self.create_module_impl(module).await
    }

    async fn get_module_by_id(&self, id: i64) -> Result<Option<Module>> {
        self.get_module_by_id_impl(id).await
    }

    async fn list_modules(&self) -> Result<Vec<Module>> {
        self.list_modules_impl().await
    }

    // 匿名码模块
    async fn create_secret_code(&self, candidate_id: i64, content: &str) -> Result<SecretCode> {
        self.create_secret_code_impl(candidate_id, content).await
    }

    async fn get_secret_code_by_candidate(&self, candidate_id: i64) -> Result<Option<SecretCode>> {
        self.get_secret_code_by_candidate_impl(candidate_id).await
    }

    async fn list_secret_codes(&self) -> Result<Vec<SecretCode>> {
        self.list_secret_codes_impl().await
    }

    // 答卷模块
    async fn create_copy(&self, candidate_id: i64, module_id: i64) -> Result<ExamCopy> {
        self.create_copy_impl(candidate_id, module_id).await
    }

    async fn get_copy_by_id(&self, id: i64) -> Result<Option<ExamCopy>> {
        self.get_copy_by_id_impl(id).await
    }

    async fn list_copies(&self) -> Result<Vec<ExamCopy>> {
        self.list_copies_impl().await
    }

    async fn list_copies_by_candidate(&self, candidate_id: i64) -> Result<Vec<ExamCopy>> {
        self.list_copies_by_candidate_impl(candidate_id).await
    }

    async fn list_copies_by_teacher(&self, teacher_id: i64) -> Result<Vec<ExamCopy>> {
        self.list_copies_by_teacher_impl(teacher_id).await
    }

    async fn assign_primary_teachers(
        &self,
        copy_id: i64,
        teacher1_id: i64,
        teacher2_id: i64,
        expected_version: i64,
    ) -> Result<bool> {
        self.assign_primary_teachers_impl(copy_id, teacher1_id, teacher2_id, expected_version)
            .await
    }

    async fn assign_arbitrator(
        &self,
        copy_id: i64,
        teacher3_id: i64,
        expected_version: i64,
    ) -> Result<bool> {
        self.assign_arbitrator_impl(copy_id, teacher3_id, expected_version)
            .await
    }

    async fn fill_mark_slot(
        &self,
        copy_id: i64,
        slot: MarkSlot,
        mark: f64,
        grader_id: i64,
        expected_version: i64,
    ) -> Result<bool> {
        self.fill_mark_slot_impl(copy_id, slot, mark, grader_id, expected_version)
            .await
    }

    // 成绩模块
    async fn get_result_by_candidate(&self, candidate_id: i64) -> Result<Option<CandidateResult>> {
        self.get_result_by_candidate_impl(candidate_id).await
    }

    async fn list_results(&self) -> Result<Vec<CandidateResult>> {
        self.list_results_impl().await
    }

    async fn publish_candidate_result(
        &self,
        candidate_id: i64,
        value: f64,
        accepted: bool,
        copies: &[(i64, i64)],
    ) -> Result<Option<CandidateResult>> {
        self.publish_candidate_result_impl(candidate_id, value, accepted, copies)
            .await
    }
}
