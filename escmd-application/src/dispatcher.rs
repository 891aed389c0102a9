//! 命令分发器
//!
//! 一次分发的生命周期：
//! `接收 → 校验命令 → 加载实体 → 执行命令 → (提交成功 | 失败)`，
//! 每次分发恰好到达一个终态，所有失败都通过同一个返回通道交付给调用方。
//!
//! 命令先于实体校验：未知或保留的命令名不会触发任何仓储访问。
//!
use crate::{
    command_table::{BoundCommand, CommandTable},
    error::{AppError, AppResult},
    message::Message,
    options::DispatcherOptions,
};
use async_trait::async_trait;
use escmd_domain::{
    entity::Entity,
    persist::{EntityStore, LoadedEntity},
};
use serde::Serialize;
use serde_json::Value;

/// 命令分发器
///
/// 具体分发器持有仓储、配置与命令表，并实现命令方法；
/// 分发流程（`handle`/`exec`/`command`/`get`/`commit`）由本 trait 提供。
#[async_trait]
pub trait CommandDispatcher: Send + Sync + Sized + 'static {
    /// 命令作用的实体类型
    type Entity: Entity + 'static;
    /// 实体仓储
    type Store: EntityStore<Self::Entity>;

    fn store(&self) -> &Self::Store;

    fn options(&self) -> &DispatcherOptions;

    fn commands(&self) -> &CommandTable<Self>;

    /// 按名称查找命令，保留名与未注册的名称均返回 `None`
    fn command(&self, name: &str) -> Option<BoundCommand<'_, Self>> {
        let command = self.commands().lookup(name)?;
        tracing::debug!(dispatcher = self.options().name(), command = name, "found valid command");
        Some(BoundCommand::new(self, name, command))
    }

    /// 解析命令并返回等待实体加载结果的续体
    fn exec(&self, name: &str, message: Message) -> AppResult<Continuation<'_, Self>> {
        let Some(command) = self.command(name) else {
            tracing::warn!(dispatcher = self.options().name(), command = name, "invalid command");
            return Err(AppError::InvalidCommand(name.to_string()));
        };
        Ok(Continuation { command, message })
    }

    /// 按标识加载实体
    async fn get(&self, id: &str) -> AppResult<LoadedEntity<Self::Entity>> {
        if id.is_empty() {
            return Err(AppError::InvalidEntityId(id.to_string()));
        }

        let entity_id = id
            .parse::<<Self::Entity as Entity>::Id>()
            .map_err(|_| AppError::InvalidEntityId(id.to_string()))?;

        let loaded = match self.store().get(&entity_id).await {
            Ok(Some(loaded)) => loaded,
            Ok(None) => return Err(AppError::EntityNotFound(id.to_string())),
            Err(err) => {
                tracing::warn!(dispatcher = self.options().name(), entity_id = id, error = %err, "entity load failed");
                return Err(AppError::Store(err));
            }
        };

        tracing::debug!(
            dispatcher = self.options().name(),
            entity_id = %loaded.entity.id(),
            cached = loaded.cached,
            "found valid entity to handle command"
        );

        Ok(loaded)
    }

    /// 提交实体，成功后返回实体数据
    async fn commit(&self, entity: &Self::Entity) -> AppResult<Value> {
        let data = serde_json::to_value(entity.data())?;
        save(self, entity).await?;
        Ok(data)
    }

    /// 提交实体，成功后返回调用方指定的数据
    async fn commit_with_result<T>(&self, entity: &Self::Entity, data: &T) -> AppResult<Value>
    where
        T: Serialize + Sync + ?Sized,
    {
        let data = serde_json::to_value(data)?;
        save(self, entity).await?;
        Ok(data)
    }

    /// 处理一条命令：先校验命令，再加载 `message.id` 指向的实体，最后执行命令
    async fn handle(&self, name: &str, message: Message) -> AppResult<Value> {
        tracing::debug!(dispatcher = self.options().name(), command = name, message = ?message, "incoming request");

        let continuation = self.exec(name, message)?;
        let loaded = match continuation.entity_id() {
            Ok(id) => self.get(&id).await,
            Err(err) => Err(err),
        };
        continuation.resume(loaded).await
    }

    /// 回调形式的 `handle`：回调恰好被调用一次
    async fn handle_with_callback<F>(&self, name: &str, message: Message, callback: F)
    where
        F: FnOnce(AppResult<Value>) + Send,
    {
        let result = self.handle(name, message).await;
        callback(result);
    }
}

async fn save<D>(dispatcher: &D, entity: &D::Entity) -> AppResult<()>
where
    D: CommandDispatcher,
{
    tracing::debug!(dispatcher = dispatcher.options().name(), entity_id = %entity.id(), "saving entity");

    dispatcher.store().commit(entity).await.map_err(|err| {
        tracing::warn!(dispatcher = dispatcher.options().name(), entity_id = %entity.id(), error = %err, "entity commit failed");
        AppError::Store(err)
    })
}

/// 已解析的命令与待冻结的消息，等待实体加载结果
pub struct Continuation<'a, D>
where
    D: CommandDispatcher,
{
    command: BoundCommand<'a, D>,
    message: Message,
}

impl<'a, D> Continuation<'a, D>
where
    D: CommandDispatcher,
{
    pub fn command_name(&self) -> &str {
        self.command.name()
    }

    /// 消息中的实体标识
    ///
    /// 缺失时为空串（由 `get` 判为非法标识）；既非字符串也非数字时携带原始 JSON 报错。
    pub fn entity_id(&self) -> AppResult<String> {
        match self.message.raw_id() {
            None => Ok(String::new()),
            Some(Value::String(id)) => Ok(id.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(other) => Err(AppError::InvalidEntityId(other.to_string())),
        }
    }

    /// 接收加载结果：错误原样返回；否则冻结消息并执行命令
    pub async fn resume(self, loaded: AppResult<LoadedEntity<D::Entity>>) -> AppResult<Value> {
        let loaded = loaded?;
        self.command
            .call(self.message.freeze(), loaded.entity)
            .await
    }
}
