//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_grading_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum GradingError {
            $($variant(String),)*
        }

        impl GradingError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(GradingError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(GradingError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(GradingError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl GradingError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        GradingError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_grading_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    NotEligible("E020", "Not Eligible"),
    Conflict("E021", "Concurrent Modification"),
    ExhaustedCodeSpace("E022", "Secret Code Space Exhausted"),
    Transport("E023", "Notification Transport Error"),
}

impl GradingError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GradingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GradingError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for GradingError {
    fn from(err: sea_orm::DbErr) -> Self {
        GradingError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for GradingError {
    fn from(err: serde_json::Error) -> Self {
        GradingError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GradingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(GradingError::cache_connection("test").code(), "E001");
        assert_eq!(GradingError::database_config("test").code(), "E003");
        assert_eq!(GradingError::validation("test").code(), "E007");
        assert_eq!(GradingError::not_eligible("test").code(), "E020");
        assert_eq!(GradingError::exhausted_code_space("test").code(), "E022");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            GradingError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            GradingError::conflict("test").error_type(),
            "Concurrent Modification"
        );
    }

    #[test]
    fn test_error_message() {
        let err = GradingError::not_eligible("copy 3 is not awaiting arbitration");
        assert_eq!(err.message(), "copy 3 is not awaiting arbitration");
    }

    #[test]
    fn test_format_simple() {
        let err = GradingError::validation("mark out of range");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("mark out of range"));
    }
}
