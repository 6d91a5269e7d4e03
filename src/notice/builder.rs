//! Notice 构建器
//!
//! 提供多种构造入口（消息、错误对象、错误对象 + 请求、配置），
//! 之后通过链式或可变方法补充 environment / session / 请求信息，最后快照出 [`Notice`]。

use super::Notice;
use crate::backtrace::{
    BacktraceExtractor, CapturedError, EMPTY_BACKTRACE_PLACEHOLDER, FrameExtractor,
    TruncatingExtractor,
};
use crate::config::{DEFAULT_ENVIRONMENT_NAME, NoticeConfig};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{NoticeError, Result};
use crate::filter::{CLOUD_ENVIRONMENT_FILTERS, STANDARD_ENVIRONMENT_FILTERS};
use crate::request::RequestContext;
use crate::system;
use crate::value::{NoticeValue, ParamMap};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Notice 构建器
///
/// 每个错误事件创建一个，线程内使用，不做内部同步。
pub struct NoticeBuilder {
    api_key: String,
    project_root: Option<String>,
    environment_name: String,
    error_message: String,
    error_class: Option<String>,
    backtrace: Vec<String>,
    environment: BTreeMap<String, NoticeValue>,
    request: ParamMap,
    session: ParamMap,
    environment_filters: Vec<String>,
    has_request: bool,
    url: Option<String>,
    component: Option<String>,
    extractor: Arc<dyn BacktraceExtractor>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl NoticeBuilder {
    // ============================================================
    // 构造入口
    // ============================================================

    /// 由错误消息创建，环境名为 `test`
    pub fn new(api_key: impl Into<String>, message: impl Into<String>) -> Result<Self> {
        Self::with_environment(api_key, message, DEFAULT_ENVIRONMENT_NAME)
    }

    /// 由错误消息创建，并指定环境名
    ///
    /// API key 为空时立即返回 [`NoticeError::MissingApiKey`]。
    pub fn with_environment(
        api_key: impl Into<String>,
        message: impl Into<String>,
        environment_name: impl Into<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(NoticeError::MissingApiKey);
        }

        let message = message.into();
        let environment_name = environment_name.into();

        Ok(Self {
            api_key,
            project_root: None,
            environment_name: if environment_name.trim().is_empty() {
                DEFAULT_ENVIRONMENT_NAME.to_string()
            } else {
                environment_name
            },
            error_message: if message.trim().is_empty() {
                String::new()
            } else {
                message
            },
            error_class: None,
            backtrace: vec![EMPTY_BACKTRACE_PLACEHOLDER.to_string()],
            environment: BTreeMap::new(),
            request: ParamMap::new(),
            session: ParamMap::new(),
            environment_filters: Vec::new(),
            has_request: false,
            url: None,
            component: None,
            extractor: Arc::new(FrameExtractor),
            diagnostics: Arc::new(TracingSink),
        })
    }

    /// 由错误对象创建，环境名为 `test`
    pub fn from_error(api_key: impl Into<String>, error: &CapturedError) -> Result<Self> {
        Self::from_error_in(api_key, error, DEFAULT_ENVIRONMENT_NAME)
    }

    /// 由错误对象创建，并指定环境名
    pub fn from_error_in(
        api_key: impl Into<String>,
        error: &CapturedError,
        environment_name: impl Into<String>,
    ) -> Result<Self> {
        Self::with_backtrace_extractor(api_key, FrameExtractor, error, environment_name)
    }

    /// 由错误对象创建，并立即提取请求上下文
    pub fn from_error_with_request(
        api_key: impl Into<String>,
        error: &CapturedError,
        environment_name: impl Into<String>,
        request: &dyn RequestContext,
    ) -> Result<Self> {
        let mut builder = Self::from_error_in(api_key, error, environment_name)?;
        builder.set_request_context(request);
        Ok(builder)
    }

    /// 由错误对象创建，并显式指定项目根路径
    pub fn from_error_with_project_root(
        api_key: impl Into<String>,
        error: &CapturedError,
        project_root: impl Into<String>,
        environment_name: impl Into<String>,
    ) -> Result<Self> {
        let mut builder = Self::from_error_in(api_key, error, environment_name)?;
        builder.set_project_root(project_root);
        Ok(builder)
    }

    /// 由错误对象创建，使用指定的调用栈提取策略
    ///
    /// 错误消息为空时回落为 `[类型名]`。
    pub fn with_backtrace_extractor(
        api_key: impl Into<String>,
        extractor: impl BacktraceExtractor + 'static,
        error: &CapturedError,
        environment_name: impl Into<String>,
    ) -> Result<Self> {
        let mut builder = Self::with_environment(
            api_key,
            error.message().unwrap_or_default(),
            environment_name,
        )?;
        builder.extractor = Arc::new(extractor);
        builder.apply_error(error);
        Ok(builder)
    }

    /// 由配置创建
    ///
    /// 配置中的过滤模式先于系统属性的内置模式加入。
    pub fn from_config(config: &NoticeConfig, error: &CapturedError) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or(NoticeError::MissingApiKey)?;

        let mut builder = match config.max_backtrace_frames {
            Some(max) => Self::with_backtrace_extractor(
                api_key,
                TruncatingExtractor::new(max),
                error,
                config.environment_name.as_str(),
            )?,
            None => Self::from_error_in(api_key, error, config.environment_name.as_str())?,
        };

        if let Some(root) = &config.project_root {
            builder.set_project_root(root.as_str());
        }
        for pattern in &config.environment_filters {
            builder.add_environment_filter(pattern.as_str());
        }
        if config.include_system_properties {
            builder.add_environment_from_system_properties();
        }
        Ok(builder)
    }

    fn apply_error(&mut self, error: &CapturedError) {
        self.error_class = Some(error.type_name().to_string());
        if self.error_message.trim().is_empty() {
            self.error_message = format!("[{}]", error.type_name());
        }
        self.backtrace = self.extractor.extract(error);
    }

    // ============================================================
    // 诊断与基础字段
    // ============================================================

    /// 替换诊断输出
    #[must_use]
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// 替换诊断输出
    pub fn set_diagnostics(&mut self, sink: Arc<dyn DiagnosticSink>) -> &mut Self {
        self.diagnostics = sink;
        self
    }

    pub fn set_project_root(&mut self, project_root: impl Into<String>) -> &mut Self {
        self.project_root = Some(project_root.into());
        self
    }

    /// 直接设置 backtrace；空列表会原样保留，不会回落为占位行
    pub fn set_backtrace(&mut self, backtrace: Vec<String>) -> &mut Self {
        self.backtrace = backtrace;
        self
    }

    /// 错误类型名是否等于给定值
    pub fn error_class_is(&self, class_name: &str) -> bool {
        self.error_class.as_deref() == Some(class_name)
    }

    // ============================================================
    // environment
    // ============================================================

    /// 合并 environment，已有 key 被覆盖；不透明值被丢弃
    pub fn add_environment<I, K, V>(&mut self, environment: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<NoticeValue>,
    {
        for (key, value) in environment {
            let (key, value) = (key.into(), value.into());
            if self.admit("environment", &key, &value) {
                self.environment.insert(key, value);
            }
        }
        self
    }

    /// 合并字符串化的属性表
    pub fn add_environment_properties<I, K, V>(&mut self, properties: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: fmt::Display,
        V: fmt::Display,
    {
        for (key, value) in properties {
            self.environment
                .insert(key.to_string(), NoticeValue::Text(value.to_string()));
        }
        self
    }

    /// 采集系统属性，并追加内置的运行时与云平台过滤模式
    pub fn add_environment_from_system_properties(&mut self) -> &mut Self {
        let properties = system::system_properties(self.diagnostics.as_ref());
        self.add_environment(properties);
        self.add_standard_environment_filters();
        self.add_cloud_environment_filters();
        self
    }

    /// 追加一个过滤模式，不去重
    pub fn add_environment_filter(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.environment_filters.push(pattern.into());
        self
    }

    /// 运行时/工具链相关的过滤模式
    pub fn add_standard_environment_filters(&mut self) -> &mut Self {
        for pattern in STANDARD_ENVIRONMENT_FILTERS {
            self.add_environment_filter(pattern);
        }
        self
    }

    /// 云平台凭据相关的过滤模式
    pub fn add_cloud_environment_filters(&mut self) -> &mut Self {
        for pattern in CLOUD_ENVIRONMENT_FILTERS {
            self.add_environment_filter(pattern);
        }
        self
    }

    // ============================================================
    // session / request
    // ============================================================

    /// 合并 session 数据；不透明值被丢弃
    pub fn add_session_data<I, K, V>(&mut self, session: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<NoticeValue>,
    {
        for (key, value) in session {
            self.add_session_key(key, value);
        }
        self
    }

    pub fn add_session_key(
        &mut self,
        key: impl Into<String>,
        value: impl Into<NoticeValue>,
    ) -> &mut Self {
        let (key, value) = (key.into(), value.into());
        if self.admit("session", &key, &value) {
            self.session.insert(key, value);
        }
        self
    }

    /// 整体替换请求参数；不透明值被丢弃
    pub fn set_request_params(&mut self, mut request: ParamMap) -> &mut Self {
        request.retain(|key, value| self.admit("request", key, value));
        self.request = request;
        self
    }

    /// 不透明值不能写入 notice，丢弃并记录诊断
    fn admit(&self, section: &str, key: &str, value: &NoticeValue) -> bool {
        if value.is_transmittable() {
            return true;
        }
        self.diagnostics.record(&Diagnostic::DroppedOpaqueValue {
            section: section.to_string(),
            name: key.to_string(),
        });
        false
    }

    /// 不依赖 Web 框架时直接设置请求信息
    pub fn set_request(
        &mut self,
        url: impl Into<String>,
        component: impl Into<String>,
    ) -> &mut Self {
        self.has_request = true;
        self.url = Some(url.into());
        self.component = Some(component.into());
        self
    }

    /// 从请求中提取 URL、component、session 与请求参数
    ///
    /// - session 存在时整体替换，只保留字符串和数字属性
    /// - 请求参数整体替换：单值存标量，多值存列表，无值的参数跳过
    pub fn set_request_context(&mut self, request: &dyn RequestContext) -> &mut Self {
        self.has_request = true;

        self.url = Some(request_path(request.request_uri()).to_string());
        self.component = request.query_string().map(str::to_string);
        if self.project_root.is_none() {
            self.project_root = request.context_path().map(str::to_string);
        }

        if let Some(session) = request.session() {
            let mut attributes = ParamMap::new();
            for name in session.attribute_names() {
                match session.attribute(&name) {
                    Some(value) if value.is_scalar() => {
                        attributes.insert(name, value);
                    }
                    Some(value) => {
                        self.diagnostics.record(&Diagnostic::DroppedSessionAttribute {
                            name,
                            kind: value.kind().to_string(),
                        });
                    }
                    None => {}
                }
            }
            self.session = attributes;
        }

        let mut params = ParamMap::new();
        for name in request.parameter_names() {
            let Some(mut values) = request.parameter_values(&name) else {
                continue;
            };
            match values.len() {
                0 => {}
                1 => {
                    params.insert(name, values.remove(0));
                }
                _ => {
                    params.insert(name, values);
                }
            }
        }
        self.request = params;

        self
    }

    // ============================================================
    // 快照
    // ============================================================

    /// 快照当前状态，构建器本身不受影响，可重复调用
    pub fn build(&self) -> Notice {
        let notice = Notice {
            id: uuid::Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            api_key: self.api_key.clone(),
            project_root: self.project_root.clone(),
            environment_name: self.environment_name.clone(),
            error_message: self.error_message.clone(),
            error_class: self.error_class.clone(),
            backtrace: self.backtrace.clone(),
            request: self.request.clone(),
            session: self.session.clone(),
            environment: self.environment.clone(),
            environment_filters: self.environment_filters.clone(),
            has_request: self.has_request,
            url: self.url.clone(),
            component: self.component.clone(),
        };

        debug!(
            notice_id = %notice.id,
            error_class = notice.error_class.as_deref().unwrap_or("-"),
            environment = %notice.environment_name,
            has_request = notice.has_request,
            "Notice built"
        );

        notice
    }
}

/// 取 URI 的路径部分：去掉 scheme、authority、查询串与片段
fn request_path(uri: &str) -> &str {
    let uri = uri.split(['?', '#']).next().unwrap_or_default();
    match uri.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |pos| &rest[pos..]),
        None => uri,
    }
}

impl fmt::Debug for NoticeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoticeBuilder")
            .field("project_root", &self.project_root)
            .field("environment_name", &self.environment_name)
            .field("error_message", &self.error_message)
            .field("error_class", &self.error_class)
            .field("backtrace", &self.backtrace)
            .field("environment_filters", &self.environment_filters)
            .field("has_request", &self.has_request)
            .finish_non_exhaustive()
    }
}
