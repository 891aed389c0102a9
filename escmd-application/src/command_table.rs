//! 命令表
//!
//! 以命令名为键登记命令实现。保留名（分发器自身的协议方法）永远不能作为命令：
//! 运行时注册会被拒绝，`#[command_handler]` 宏则借助 `is_reserved` 在编译期拒绝。
//!
use crate::{
    dispatcher::CommandDispatcher,
    error::{AppError, AppResult},
    message::FrozenMessage,
};
use dashmap::{DashMap, mapref::entry::Entry};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// 不能注册为命令的名称
pub const RESERVED_COMMANDS: &[&str] = &[
    "constructor",
    "command",
    "handle",
    "commit",
    "bind",
    "exec",
    "get",
    "commit_with_result",
    "handle_with_callback",
];

/// 判断名称是否为保留名（可在常量求值中使用）
pub const fn is_reserved(name: &str) -> bool {
    let mut i = 0;
    while i < RESERVED_COMMANDS.len() {
        if str_eq(RESERVED_COMMANDS[i], name) {
            return true;
        }
        i += 1;
    }
    false
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

pub type CommandFuture<'a> = Pin<Box<dyn Future<Output = AppResult<Value>> + Send + 'a>>;

/// 命令实现：以分发器实例、冻结消息与已加载实体为输入
pub type CommandFn<D> =
    for<'a> fn(&'a D, FrozenMessage, <D as CommandDispatcher>::Entity) -> CommandFuture<'a>;

pub struct CommandTable<D>
where
    D: CommandDispatcher,
{
    commands: DashMap<String, CommandFn<D>>,
}

impl<D> Default for CommandTable<D>
where
    D: CommandDispatcher,
{
    fn default() -> Self {
        Self {
            commands: DashMap::new(),
        }
    }
}

impl<D> CommandTable<D>
where
    D: CommandDispatcher,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册命令
    pub fn register(&self, name: &str, command: CommandFn<D>) -> AppResult<()> {
        if is_reserved(name) {
            return Err(AppError::ReservedCommand(name.to_string()));
        }

        match self.commands.entry(name.to_string()) {
            Entry::Occupied(_) => Err(AppError::AlreadyRegisteredCommand {
                command: name.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(command);
                Ok(())
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<CommandFn<D>> {
        if is_reserved(name) {
            return None;
        }
        self.commands.get(name).map(|f| *f.value())
    }

    /// 已注册的命令名（按字典序）
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// 与分发器实例绑定的命令，可脱离调用点独立调用
pub struct BoundCommand<'a, D>
where
    D: CommandDispatcher,
{
    dispatcher: &'a D,
    name: String,
    command: CommandFn<D>,
}

impl<'a, D> BoundCommand<'a, D>
where
    D: CommandDispatcher,
{
    pub(crate) fn new(dispatcher: &'a D, name: &str, command: CommandFn<D>) -> Self {
        Self {
            dispatcher,
            name: name.to_string(),
            command,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, message: FrozenMessage, entity: D::Entity) -> CommandFuture<'a> {
        (self.command)(self.dispatcher, message, entity)
    }
}

impl<D> Clone for BoundCommand<'_, D>
where
    D: CommandDispatcher,
{
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher,
            name: self.name.clone(),
            command: self.command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_names_are_recognised_in_const_context() {
        const EXEC: bool = is_reserved("exec");
        const RENAME: bool = is_reserved("rename");
        assert!(EXEC);
        assert!(!RENAME);

        for name in RESERVED_COMMANDS {
            assert!(is_reserved(name), "{name} should be reserved");
        }
        assert!(!is_reserved("Handle"));
        assert!(!is_reserved("commits"));
        assert!(!is_reserved(""));
    }
}
