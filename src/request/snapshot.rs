//! 内存中的请求快照
//!
//! 没有 Web 框架时，调用方可以直接组装一个 [`RequestSnapshot`]。

use super::table::ParameterTable;
use super::{RequestContext, SessionAttributes};
use crate::value::{NoticeValue, ParamMap};

/// session 属性快照，保持插入顺序
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    attributes: ParamMap,
}

impl SessionSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加属性，同名属性原位覆盖
    #[must_use]
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<NoticeValue>,
    ) -> Self {
        self.attributes.insert(name, value);
        self
    }
}

impl SessionAttributes for SessionSnapshot {
    fn attribute_names(&self) -> Vec<String> {
        self.attributes.keys().map(str::to_string).collect()
    }

    fn attribute(&self, name: &str) -> Option<NoticeValue> {
        self.attributes.get(name).cloned()
    }
}

/// 请求快照
#[derive(Debug, Clone, Default)]
pub struct RequestSnapshot {
    request_uri: String,
    query_string: Option<String>,
    context_path: Option<String>,
    session: Option<SessionSnapshot>,
    parameters: ParameterTable,
}

impl RequestSnapshot {
    /// 创建请求快照
    pub fn new(request_uri: impl Into<String>) -> Self {
        Self {
            request_uri: request_uri.into(),
            ..Default::default()
        }
    }

    /// 设置查询串
    #[must_use]
    pub fn with_query_string(mut self, query: impl Into<String>) -> Self {
        self.query_string = Some(query.into());
        self
    }

    /// 设置部署根路径
    #[must_use]
    pub fn with_context_path(mut self, path: impl Into<String>) -> Self {
        self.context_path = Some(path.into());
        self
    }

    /// 设置 session
    #[must_use]
    pub fn with_session(mut self, session: SessionSnapshot) -> Self {
        self.session = Some(session);
        self
    }

    /// 设置参数的全部取值，允许为空列表
    #[must_use]
    pub fn with_parameter<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        self.parameters
            .set(&name, values.into_iter().map(Into::into).collect());
        self
    }

    /// 追加参数的一个取值，同名参数按调用顺序聚合
    #[must_use]
    pub fn with_parameter_value(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.parameters.push(&name, value.into());
        self
    }
}

impl RequestContext for RequestSnapshot {
    fn request_uri(&self) -> &str {
        &self.request_uri
    }

    fn query_string(&self) -> Option<&str> {
        self.query_string.as_deref()
    }

    fn context_path(&self) -> Option<&str> {
        self.context_path.as_deref()
    }

    fn session(&self) -> Option<&dyn SessionAttributes> {
        self.session.as_ref().map(|s| s as &dyn SessionAttributes)
    }

    fn parameter_names(&self) -> Vec<String> {
        self.parameters.names()
    }

    fn parameter_values(&self, name: &str) -> Option<Vec<String>> {
        self.parameters.values(name)
    }
}
