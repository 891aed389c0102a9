//! 带缓存层的实体仓储装饰器
//!
//! 记住最近一次加载或提交成功的实体副本，重复加载直接由缓存返回并标记 `cached = true`；
//! 提交失败时移除对应缓存，避免后续加载拿到过期状态。
//! 缓存只会被版本不低于现有副本的实体覆盖，与提交交错完成的慢加载不会回退缓存。
//!
use crate::{
    entity::Entity,
    error::DomainResult,
    persist::{EntityStore, LoadedEntity},
};
use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};

pub struct CachedEntityStore<S, E> {
    inner: S,
    cache: DashMap<String, E>,
}

impl<S, E> CachedEntityStore<S, E>
where
    E: Entity + Clone,
{
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// 丢弃指定实体的缓存副本
    pub fn invalidate(&self, id: &E::Id) {
        self.cache.remove(&id.to_string());
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    // 仅当缓存缺失或副本不新于 entity 时写入
    fn remember(&self, key: String, entity: &E) {
        match self.cache.entry(key) {
            Entry::Occupied(mut slot) => {
                if slot.get().version() <= entity.version() {
                    slot.insert(entity.clone());
                } else {
                    tracing::trace!(
                        entity_id = %slot.key(),
                        cached_version = slot.get().version(),
                        loaded_version = entity.version(),
                        "kept newer cached entity"
                    );
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(entity.clone());
            }
        }
    }
}

#[async_trait]
impl<S, E> EntityStore<E> for CachedEntityStore<S, E>
where
    S: EntityStore<E>,
    E: Entity + Clone + 'static,
{
    async fn get(&self, id: &E::Id) -> DomainResult<Option<LoadedEntity<E>>> {
        let key = id.to_string();

        // 先取出副本再释放分片锁，避免跨 await 持有 DashMap 引用
        let hit = self.cache.get(&key).map(|e| e.value().clone());
        if let Some(entity) = hit {
            tracing::trace!(entity_id = %key, "entity served from cache");
            return Ok(Some(LoadedEntity::cached(entity)));
        }

        let loaded = self.inner.get(id).await?;
        if let Some(loaded) = &loaded {
            self.remember(key, &loaded.entity);
        }

        Ok(loaded)
    }

    async fn commit(&self, entity: &E) -> DomainResult<()> {
        let key = entity.id().to_string();

        match self.inner.commit(entity).await {
            Ok(()) => {
                self.remember(key, entity);
                Ok(())
            }
            Err(err) => {
                self.cache.remove(&key);
                Err(err)
            }
        }
    }
}
