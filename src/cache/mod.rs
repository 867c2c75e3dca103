//! 对象缓存层
//!
//! 通过 `ObjectCache` trait 对外提供统一的缓存接口，后端由插件注册表按配置选择
//! （moka 内存缓存或 Redis）。聚合数据的写入、失效都显式地走这里，
//! 不使用任何隐式的注解式缓存。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    /// 命中
    Found(T),
    /// 未命中
    NotFound,
    /// 键存在但取值失败（例如后端连接错误），调用方按未命中处理
    ExistsButNoValue,
}

/// 对象缓存统一接口
///
/// 值以 JSON 字符串存取，序列化由调用方负责。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 声明一个缓存后端插件并在程序加载时注册到注册表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $wrapper:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<_register_ $wrapper:snake _plugin>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            match $wrapper::new() {
                                Ok(cache) => {
                                    Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                                }
                                Err(e) => Err($crate::errors::UniHubError::cache_connection(e)),
                            }
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
