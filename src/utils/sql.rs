/// 转义 LIKE 模式中的通配符
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 数据库错误信息是否为唯一约束冲突（SQLite / Postgres / MySQL）
pub fn is_unique_violation(message: &str) -> bool {
    message.contains("UNIQUE constraint failed")
        || message.contains("duplicate key value")
        || message.contains("Duplicate entry")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("abc"), "abc");
        assert_eq!(escape_like_pattern("50%_off"), "50\\%\\_off");
    }

    #[test]
    fn test_is_unique_violation() {
        assert!(is_unique_violation(
            "UNIQUE constraint failed: modules.name"
        ));
        assert!(is_unique_violation(
            "duplicate key value violates unique constraint \"idx_users_username\""
        ));
        assert!(!is_unique_violation("no such table: modules"));
    }
}
