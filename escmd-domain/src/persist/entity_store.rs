//! 实体仓储协议
//!
use crate::{entity::Entity, error::DomainResult};
use async_trait::async_trait;
use std::sync::Arc;

/// 仓储加载结果：实体本身与是否来自缓存层的标记。
///
/// `cached` 仅作透传，分发器不对其做任何解释。
#[derive(Debug, Clone)]
pub struct LoadedEntity<E> {
    pub entity: E,
    pub cached: bool,
}

impl<E> LoadedEntity<E> {
    pub fn fresh(entity: E) -> Self {
        Self {
            entity,
            cached: false,
        }
    }

    pub fn cached(entity: E) -> Self {
        Self {
            entity,
            cached: true,
        }
    }
}

/// 实体仓储：命令分发器的持久化协作者
///
/// - `get` 返回 `Ok(None)` 表示“不存在”，不属于错误；
/// - `commit` 持久化实体的当前状态（或其未提交的变更）。
#[async_trait]
pub trait EntityStore<E>: Send + Sync
where
    E: Entity,
{
    async fn get(&self, id: &E::Id) -> DomainResult<Option<LoadedEntity<E>>>;

    async fn commit(&self, entity: &E) -> DomainResult<()>;
}

#[async_trait]
impl<E, T> EntityStore<E> for Arc<T>
where
    E: Entity + 'static,
    T: EntityStore<E> + ?Sized,
{
    async fn get(&self, id: &E::Id) -> DomainResult<Option<LoadedEntity<E>>> {
        (**self).get(id).await
    }

    async fn commit(&self, entity: &E) -> DomainResult<()> {
        (**self).commit(entity).await
    }
}
