//! Contest Grading - 博士招考匿名阅卷与成绩发布服务
//!
//! 基于 Actix Web 构建。院长为考生发放匿名码，招考委员会主席分配阅卷教师，
//! 教师按匿名码评分，分差过大的答卷交由第三位教师仲裁，最后按考生汇总发布成绩。
//!
//! # 架构
//! - `cache`: 缓存层（Moka）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `grading`: 阅卷协调引擎（状态判定、分配、评分、发布）
//! - `middlewares`: 认证授权与限流中间件
//! - `models`: 数据模型定义
//! - `notifications`: 邮件通知
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: HTTP 业务适配层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod grading;
pub mod middlewares;
pub mod models;
pub mod notifications;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
