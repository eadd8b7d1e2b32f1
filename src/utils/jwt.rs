use crate::config::AppConfig;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub role: String,       // 用户角色
    pub token_type: String, // token类型，目前只有 "access"
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

const ACCESS_TOKEN_TYPE: &str = "access";

pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    // 生成 Access Token
    pub fn generate_access_token(
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::encode_with_secret(
            user_id,
            role,
            &Self::get_secret(),
            chrono::Duration::minutes(config.jwt.access_token_expiry),
        )
    }

    // 使用指定密钥签发 Access Token
    pub fn encode_with_secret(
        user_id: i64,
        role: &str,
        secret: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
    }

    // 验证 Access Token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::decode_with_secret(token, &Self::get_secret())
    }

    // 使用指定密钥验证 Access Token
    pub fn decode_with_secret(
        token: &str,
        secret: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let claims = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)?;

        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_carries_user_and_role() {
        let token =
            JwtUtils::encode_with_secret(42, "teacher", "secret", chrono::Duration::minutes(5))
                .unwrap();
        let claims = JwtUtils::decode_with_secret(&token, "secret").unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, "teacher");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token =
            JwtUtils::encode_with_secret(1, "dean", "secret", chrono::Duration::minutes(5))
                .unwrap();
        assert!(JwtUtils::decode_with_secret(&token, "other").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token =
            JwtUtils::encode_with_secret(1, "dean", "secret", chrono::Duration::minutes(-10))
                .unwrap();
        assert!(JwtUtils::decode_with_secret(&token, "secret").is_err());
    }
}
