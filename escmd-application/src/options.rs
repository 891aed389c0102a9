use crate::error::AppResult;
use bon::Builder;
use serde::{Deserialize, Serialize};

/// 分发器配置
///
/// - `name`：分发器名称，作为日志字段区分同进程内的多个分发器；
/// - `extensions`：留给具体分发器解释的扩展配置，分发器本身不读取。
///
/// ```rust
/// use escmd_application::options::DispatcherOptions;
///
/// let opts = DispatcherOptions::builder()
///     .name("accounts")
///     .extensions(serde_json::json!({ "currency": "EUR" }))
///     .build();
/// assert_eq!(opts.name(), "accounts");
/// assert_eq!(opts.extension("currency"), Some(&serde_json::json!("EUR")));
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatcherOptions {
    #[builder(into, default = default_name())]
    #[serde(default = "default_name")]
    name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    extensions: Option<serde_json::Value>,
}

fn default_name() -> String {
    "dispatcher".to_string()
}

impl Default for DispatcherOptions {
    fn default() -> Self {
        Self {
            name: default_name(),
            extensions: None,
        }
    }
}

impl DispatcherOptions {
    /// 从 JSON 配置加载，缺省字段取默认值
    pub fn from_json(raw: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extensions(&self) -> Option<&serde_json::Value> {
        self.extensions.as_ref()
    }

    pub fn extension(&self, key: &str) -> Option<&serde_json::Value> {
        self.extensions.as_ref()?.get(key)
    }
}
