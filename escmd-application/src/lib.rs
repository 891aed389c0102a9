//! 命令分发的应用层（escmd-application）
//!
//! 以具名命令 + 消息载荷为输入，完成一次完整的分发：
//! 校验命令是否存在且非保留名 → 按消息中的 `id` 从仓储加载实体 →
//! 以只读消息与实体调用命令 → 由命令自行提交变更并返回结果。
//!
//! 具体的命令集合由实现 [`CommandDispatcher`] 的类型通过 [`CommandTable`] 注册，
//! 通常借助 `escmd_macros::command_handler` 宏生成。
//!
pub mod command_table;
pub mod dispatcher;
pub mod error;
pub mod message;
pub mod options;

pub use command_table::{BoundCommand, CommandTable, RESERVED_COMMANDS, is_reserved};
pub use dispatcher::{CommandDispatcher, Continuation};
pub use error::{AppError, AppResult};
pub use message::{FrozenMessage, Message};
pub use options::DispatcherOptions;
