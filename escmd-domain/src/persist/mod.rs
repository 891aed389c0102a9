//! 实体仓储（persist）
//!
//! 定义命令分发所依赖的实体仓储协议，支持：
//! - 按标识加载实体并附带“是否命中缓存”的标记（`EntityStore::get`）；
//! - 提交实体变更（`EntityStore::commit`）；
//! - 内存实现（`InMemoryEntityStore`）与缓存装饰器（`CachedEntityStore`）。
//!
//! 具体存储后端（如事件存储、数据库）由上层提供实现并注入。
//!
#[cfg(feature = "inmemory")]
mod cached_store;
mod entity_store;
#[cfg(feature = "inmemory")]
mod inmemory_store;

#[cfg(feature = "inmemory")]
pub use cached_store::CachedEntityStore;
pub use entity_store::{EntityStore, LoadedEntity};
#[cfg(feature = "inmemory")]
pub use inmemory_store::InMemoryEntityStore;
