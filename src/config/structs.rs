use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    #[serde(default)]
    pub argon2: Argon2Config,
    #[serde(default)]
    pub grading: GradingConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub secret: String,
    pub access_token_expiry: i64,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(rename = "type")]
    pub cache_type: String,
    pub default_ttl: u64,
    pub memory: MemoryConfig,
}

/// 内存缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub max_capacity: u64,
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: usize,
}

/// Argon2 密码哈希参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    pub memory_cost: u32, // KiB
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_cost: 19456,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

/// 阅卷与成绩发布规则
///
/// 所有字段都有默认值，最小配置下即为竞赛章程规定的常量。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingConfig {
    /// 两位阅卷人分差达到该值时需要第三位阅卷人仲裁
    #[serde(default = "default_mark_difference_threshold")]
    pub mark_difference_threshold: f64,
    /// 录取最低分
    #[serde(default = "default_minimum_passing_mark")]
    pub minimum_passing_mark: f64,
    /// 匿名码长度
    #[serde(default = "default_secret_code_length")]
    pub secret_code_length: usize,
    /// 每位候选人必须完成的科目数
    #[serde(default = "default_required_modules_per_candidate")]
    pub required_modules_per_candidate: usize,
    /// 成绩换算系数：(科目 A + 科目 B) * multiplier
    #[serde(default = "default_result_calculation_multiplier")]
    pub result_calculation_multiplier: f64,
    /// 单科满分
    #[serde(default = "default_max_mark")]
    pub max_mark: f64,
    /// 并发提交分数时的乐观锁重试次数
    #[serde(default = "default_mark_submit_retries")]
    pub mark_submit_retries: u32,
}

fn default_mark_difference_threshold() -> f64 {
    3.0
}

fn default_minimum_passing_mark() -> f64 {
    10.0
}

fn default_secret_code_length() -> usize {
    4
}

fn default_required_modules_per_candidate() -> usize {
    2
}

fn default_result_calculation_multiplier() -> f64 {
    2.0 / 3.0
}

fn default_max_mark() -> f64 {
    20.0
}

fn default_mark_submit_retries() -> u32 {
    3
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            mark_difference_threshold: default_mark_difference_threshold(),
            minimum_passing_mark: default_minimum_passing_mark(),
            secret_code_length: default_secret_code_length(),
            required_modules_per_candidate: default_required_modules_per_candidate(),
            result_calculation_multiplier: default_result_calculation_multiplier(),
            max_mark: default_max_mark(),
            mark_submit_retries: default_mark_submit_retries(),
        }
    }
}
