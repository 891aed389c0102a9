//! 基于内存的实体仓储
//!
//! 以实体标识的字符串形式为键保存实体的最新状态，提交时做乐观版本检查：
//! 被提交实体的版本必须大于已保存的版本，否则返回 `VersionConflict`。
//!
use crate::{
    entity::Entity,
    error::{DomainError, DomainResult},
    persist::{EntityStore, LoadedEntity},
};
use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};

pub struct InMemoryEntityStore<E> {
    entities: DashMap<String, E>,
}

impl<E> Default for InMemoryEntityStore<E> {
    fn default() -> Self {
        Self {
            entities: DashMap::new(),
        }
    }
}

impl<E> InMemoryEntityStore<E>
where
    E: Entity + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接写入实体（不做版本检查），用于初始化数据
    pub fn insert(&self, entity: E) {
        self.entities.insert(entity.id().to_string(), entity);
    }

    /// 读取已保存实体的快照副本
    pub fn snapshot(&self, id: &E::Id) -> Option<E> {
        self.entities.get(&id.to_string()).map(|e| e.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[async_trait]
impl<E> EntityStore<E> for InMemoryEntityStore<E>
where
    E: Entity + Clone + 'static,
{
    async fn get(&self, id: &E::Id) -> DomainResult<Option<LoadedEntity<E>>> {
        Ok(self.snapshot(id).map(LoadedEntity::fresh))
    }

    async fn commit(&self, entity: &E) -> DomainResult<()> {
        let key = entity.id().to_string();

        // entry 持有分片写锁，检查与写入在同一临界区内完成
        match self.entities.entry(key) {
            Entry::Occupied(mut slot) => {
                let stored = slot.get().version();
                if entity.version() <= stored {
                    return Err(DomainError::VersionConflict {
                        id: slot.key().clone(),
                        expected: stored,
                        actual: entity.version(),
                    });
                }
                slot.insert(entity.clone());
            }
            Entry::Vacant(slot) => {
                slot.insert(entity.clone());
            }
        }

        tracing::trace!(entity_id = %entity.id(), version = entity.version(), "entity stored");

        Ok(())
    }
}
