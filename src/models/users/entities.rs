use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Admin,        // 系统管理员
    Dean,         // 院长：发放匿名码
    CfdPresident, // 博士招考委员会主席：分配阅卷人、发布成绩
    Teacher,      // 阅卷教师
    Candidate,    // 考生
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const DEAN: &'static str = "dean";
    pub const CFD_PRESIDENT: &'static str = "cfd_president";
    pub const TEACHER: &'static str = "teacher";
    pub const CANDIDATE: &'static str = "candidate";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn dean_roles() -> &'static [&'static UserRole] {
        &[&Self::Dean]
    }
    pub fn president_roles() -> &'static [&'static UserRole] {
        &[&Self::CfdPresident]
    }
    pub fn copy_registrar_roles() -> &'static [&'static UserRole] {
        &[&Self::CfdPresident, &Self::Admin]
    }
    pub fn teacher_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher]
    }
    pub fn result_reader_roles() -> &'static [&'static UserRole] {
        &[&Self::Candidate, &Self::Dean, &Self::CfdPresident, &Self::Admin]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Admin,
            &Self::Dean,
            &Self::CfdPresident,
            &Self::Teacher,
            &Self::Candidate,
        ]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: admin, dean, cfd_president, teacher, candidate"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
            UserRole::Dean => write!(f, "{}", UserRole::DEAN),
            UserRole::CfdPresident => write!(f, "{}", UserRole::CFD_PRESIDENT),
            UserRole::Teacher => write!(f, "{}", UserRole::TEACHER),
            UserRole::Candidate => write!(f, "{}", UserRole::CANDIDATE),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::ADMIN => Ok(UserRole::Admin),
            UserRole::DEAN => Ok(UserRole::Dean),
            UserRole::CFD_PRESIDENT => Ok(UserRole::CfdPresident),
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::CANDIDATE => Ok(UserRole::Candidate),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserStatus {
    Active,    // 活跃
    Inactive,  // 非活跃
    Suspended, // 暂停
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(serde::de::Error::custom(format!(
                "无效的用户状态: '{s}'. 支持的状态: active, inactive, suspended"
            ))),
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub display_name: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// 通知与列表中展示的名称，未设置显示名时回退到用户名
    pub fn full_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    // 生成访问令牌
    pub fn generate_access_token(&self) -> Result<String, String> {
        crate::utils::jwt::JwtUtils::generate_access_token(self.id, &self.role.to_string())
            .map_err(|e| format!("生成 access token 失败: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        for role in UserRole::all_roles() {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(&parsed, *role);
        }
    }

    #[test]
    fn test_role_deserialize_rejects_unknown() {
        let err = serde_json::from_str::<UserRole>("\"president\"").unwrap_err();
        assert!(err.to_string().contains("cfd_president"));
    }

    #[test]
    fn test_cfd_president_serializes_snake_case() {
        let json = serde_json::to_string(&UserRole::CfdPresident).unwrap();
        assert_eq!(json, "\"cfd_president\"");
    }
}
