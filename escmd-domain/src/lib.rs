//! 命令分发的领域层基础库（escmd-domain）
//!
//! 为命令分发器提供所依赖的领域层协议：
//! - 实体（`entity`）：标识、版本与提交后回传的数据视图
//! - 实体仓储（`persist`）：按标识加载实体、提交实体变更的协作者接口，
//!   以及用于测试与演示的内存实现和缓存装饰器
//! - 统一错误（`error`）
//!
//! 实体如何由事件流重建、仓储如何存取事件，均由具体仓储实现决定，
//! 本 crate 只约定加载/提交的最小接口。
//!
pub mod entity;
pub mod error;
pub mod persist;

// 允许在本 crate 内部通过 ::escmd_domain 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::escmd_domain 路径。
extern crate self as escmd_domain;
