//! 命令消息
//!
//! `Message` 是调用方构造的可变载荷（JSON 对象），至少包含标识目标实体的 `id` 字段；
//! 进入分发后被冻结为 `FrozenMessage`：共享、只读，命令实现无法修改调用方的输入。
//!
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(Map<String, Value>);

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以实体标识创建消息
    pub fn with_id(id: impl Into<String>) -> Self {
        Self::new().field("id", id.into())
    }

    /// 追加字段（构建式）
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// 目标实体标识：字符串原样返回，数字转为十进制字符串，其余视为缺失
    pub fn id(&self) -> Option<String> {
        extract_id(&self.0)
    }

    /// `id` 字段的原始 JSON 值
    pub fn raw_id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// 冻结消息，此后只能只读访问
    pub fn freeze(self) -> FrozenMessage {
        FrozenMessage(Arc::new(self.0))
    }
}

impl TryFrom<Value> for Message {
    type Error = AppError;

    fn try_from(value: Value) -> AppResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(AppError::InvalidMessage(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }
}

impl From<Map<String, Value>> for Message {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// 冻结后的消息：可廉价克隆，仅提供只读视图
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenMessage(Arc<Map<String, Value>>);

impl FrozenMessage {
    pub fn id(&self) -> Option<String> {
        extract_id(&self.0)
    }

    pub fn raw_id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    /// 将载荷解析为命令自定义的输入类型
    pub fn parse<T: DeserializeOwned>(&self) -> AppResult<T> {
        T::deserialize(Value::Object((*self.0).clone()))
            .map_err(|e| AppError::InvalidMessage(e.to_string()))
    }

    /// 复制出一份可变消息（例如转发给其他命令）
    pub fn thaw(&self) -> Message {
        Message((*self.0).clone())
    }
}

impl Deref for FrozenMessage {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn extract_id(map: &Map<String, Value>) -> Option<String> {
    match map.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Rename {
        id: String,
        name: String,
    }

    #[test]
    fn id_accepts_strings_and_numbers() {
        assert_eq!(Message::with_id("e1").id().as_deref(), Some("e1"));
        assert_eq!(Message::new().field("id", 42).id().as_deref(), Some("42"));
        assert_eq!(Message::new().field("id", true).id(), None);
        assert_eq!(Message::new().id(), None);
    }

    #[test]
    fn non_object_json_is_rejected() {
        let err = Message::try_from(json!([1, 2])).unwrap_err();
        assert!(matches!(err, AppError::InvalidMessage(_)));

        let msg = Message::try_from(json!({"id": "e1"})).unwrap();
        assert_eq!(msg.id().as_deref(), Some("e1"));
    }

    #[test]
    fn frozen_message_is_a_shared_read_only_view() {
        let frozen = Message::with_id("e1").field("name", "X").freeze();
        let copy = frozen.clone();

        assert_eq!(copy.get("name"), Some(&json!("X")));
        assert_eq!(frozen.id().as_deref(), Some("e1"));

        let parsed: Rename = frozen.parse().unwrap();
        assert_eq!(parsed.id, "e1");
        assert_eq!(parsed.name, "X");

        // 解冻得到的是独立副本，修改它不影响冻结消息
        let mut thawed = frozen.thaw();
        thawed.insert("name", "Y");
        assert_eq!(frozen.get("name"), Some(&json!("X")));
    }

    #[test]
    fn parse_reports_shape_mismatch() {
        let frozen = Message::with_id("e1").freeze();
        let err = frozen.parse::<Rename>().unwrap_err();
        match err {
            AppError::InvalidMessage(reason) => assert!(reason.contains("name")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn frozen_message_renders_as_json_through_thaw() {
        let frozen = Message::with_id("e1").field("tags", json!(["a"])).freeze();
        let rendered = serde_json::to_value(frozen.thaw()).unwrap();
        assert_eq!(rendered, json!({ "id": "e1", "tags": ["a"] }));
        assert_eq!(frozen.raw_id(), Some(&json!("e1")));
    }
}
