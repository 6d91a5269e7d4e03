//! 不可变的 notice 快照

use crate::filter;
use crate::value::{NoticeValue, ParamMap};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// 最终交给投递方的错误上报内容
///
/// 由 [`NoticeBuilder::build`](super::NoticeBuilder::build) 生成，生成后不可修改。
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub(super) id: Uuid,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub(super) created_at: chrono::DateTime<chrono::Utc>,
    pub(super) api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) project_root: Option<String>,
    pub(super) environment_name: String,
    pub(super) error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) error_class: Option<String>,
    pub(super) backtrace: Vec<String>,
    pub(super) request: ParamMap,
    pub(super) session: ParamMap,
    pub(super) environment: BTreeMap<String, NoticeValue>,
    pub(super) environment_filters: Vec<String>,
    pub(super) has_request: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) component: Option<String>,
}

impl Notice {
    /// notice 唯一标识
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn project_root(&self) -> Option<&str> {
        self.project_root.as_deref()
    }

    pub fn environment_name(&self) -> &str {
        &self.environment_name
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// 错误的完整类型名，仅在由错误对象构建时存在
    pub fn error_class(&self) -> Option<&str> {
        self.error_class.as_deref()
    }

    pub fn backtrace(&self) -> &[String] {
        &self.backtrace
    }

    pub fn request(&self) -> &ParamMap {
        &self.request
    }

    pub fn session(&self) -> &ParamMap {
        &self.session
    }

    /// 未经过滤的 environment，按 key 排序
    pub fn environment(&self) -> &BTreeMap<String, NoticeValue> {
        &self.environment
    }

    pub fn environment_filters(&self) -> &[String] {
        &self.environment_filters
    }

    pub fn has_request(&self) -> bool {
        self.has_request
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    /// key 是否命中任意过滤模式
    pub fn is_filtered(&self, key: &str) -> bool {
        filter::matches_any(key, &self.environment_filters)
    }

    /// 去掉所有命中过滤模式的 key 后的 environment
    pub fn filtered_environment(&self) -> BTreeMap<String, NoticeValue> {
        self.environment
            .iter()
            .filter(|(key, _)| !self.is_filtered(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
