//! `http::Request` 适配器

use super::table::ParameterTable;
use super::{RequestContext, SessionAttributes, SessionSnapshot};

/// 把 `http::Request` 包装为 [`RequestContext`]
///
/// 查询参数按 `application/x-www-form-urlencoded` 解码，同名参数按出现顺序聚合；
/// session 从请求扩展中的 [`SessionSnapshot`] 读取。
pub struct HttpRequestContext<'a, B> {
    request: &'a ::http::Request<B>,
    context_path: Option<String>,
    parameters: ParameterTable,
}

impl<'a, B> HttpRequestContext<'a, B> {
    pub fn new(request: &'a ::http::Request<B>) -> Self {
        let mut parameters = ParameterTable::default();
        if let Some(query) = request.uri().query() {
            for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
                parameters.push(&name, value.into_owned());
            }
        }

        Self {
            request,
            context_path: None,
            parameters,
        }
    }

    /// 设置部署根路径
    #[must_use]
    pub fn with_context_path(mut self, path: impl Into<String>) -> Self {
        self.context_path = Some(path.into());
        self
    }
}

impl<B> RequestContext for HttpRequestContext<'_, B> {
    fn request_uri(&self) -> &str {
        self.request.uri().path()
    }

    fn query_string(&self) -> Option<&str> {
        self.request.uri().query()
    }

    fn context_path(&self) -> Option<&str> {
        self.context_path.as_deref()
    }

    fn session(&self) -> Option<&dyn SessionAttributes> {
        self.request
            .extensions()
            .get::<SessionSnapshot>()
            .map(|s| s as &dyn SessionAttributes)
    }

    fn parameter_names(&self) -> Vec<String> {
        self.parameters.names()
    }

    fn parameter_values(&self, name: &str) -> Option<Vec<String>> {
        self.parameters.values(name)
    }
}
