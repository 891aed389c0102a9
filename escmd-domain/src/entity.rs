//! 实体（Entity）基础抽象
//!
//! 为命令作用的聚合提供统一的标识（Id）、版本（optimistic locking）与数据视图。
//!
use serde::Serialize;
use std::{fmt::Display, str::FromStr};

/// 具备唯一标识与版本的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可解析、可显示与可克隆
    type Id: FromStr + Clone + Display + Send + Sync;

    /// 提交成功后默认回传给调用方的数据
    type Data: Serialize + ?Sized;

    /// 使用给定标识与版本创建实体
    fn new(id: Self::Id, version: usize) -> Self;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;

    /// 获取当前版本（用于乐观锁与并发控制）
    fn version(&self) -> usize;

    /// 获取实体数据
    fn data(&self) -> &Self::Data;
}

#[cfg(test)]
mod tests {
    use super::Entity;
    use escmd_macros::{entity, entity_id};

    #[entity_id]
    struct TicketId(uuid::Uuid);

    #[entity(id = TicketId, data = title)]
    struct Ticket {
        title: String,
        open: bool,
    }

    #[entity]
    struct Note {
        body: String,
    }

    #[test]
    fn entity_macro_prepends_identity_fields() {
        let id = TicketId::new(uuid::Uuid::new_v4());
        let mut ticket = Ticket::new(id.clone(), 3);
        ticket.title = "printer on fire".into();

        assert_eq!(ticket.id(), &id);
        assert_eq!(ticket.version(), 3);
        assert_eq!(ticket.data(), "printer on fire");
        assert!(!ticket.open);
    }

    #[test]
    fn entity_without_data_field_is_its_own_data() {
        let mut note = Note::new("n-1".to_string(), 0);
        note.body = "hello".into();

        let json = serde_json::to_value(note.data()).unwrap();
        assert_eq!(json["id"], "n-1");
        assert_eq!(json["version"], 0);
        assert_eq!(json["body"], "hello");
    }

    #[test]
    fn entity_id_parses_and_displays() {
        let raw = uuid::Uuid::new_v4();
        let id: TicketId = raw.to_string().parse().unwrap();
        assert_eq!(id.to_string(), raw.to_string());
        assert!("not-a-uuid".parse::<TicketId>().is_err());
    }
}
