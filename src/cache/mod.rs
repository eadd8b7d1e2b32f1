//! 对象缓存层
//!
//! 缓存后端以插件方式注册，启动时按 `cache.type` 选择；当前内置 `moka` 内存缓存。
//! 中间件用它缓存 JWT 对应的用户信息，值统一以 JSON 字符串存放。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 为缓存后端生成注册函数
///
/// 展开后在当前模块得到 `register_plugin()`，由 [`register_builtin_plugins`] 统一调用。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        pub fn register_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::GradingError::cache_connection)?;
                        Ok::<Box<dyn $crate::cache::ObjectCache>, $crate::errors::GradingError>(
                            Box::new(cache),
                        )
                    })
                }),
            );
        }
    };
}

/// 注册全部内置缓存后端，重复调用会覆盖同名条目
pub fn register_builtin_plugins() {
    object_cache::moka::register_plugin();
}
