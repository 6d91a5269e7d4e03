//! 上报配置

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// 未配置环境名时使用的默认值
pub const DEFAULT_ENVIRONMENT_NAME: &str = "test";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NoticeConfig {
    /// 项目 API key（必填，缺失时在构建 notice 时立即报错）
    pub api_key: Option<String>,
    #[serde(default = "default_environment_name")]
    pub environment_name: String,
    pub project_root: Option<String>,
    /// 额外的 environment 过滤模式，追加在内置模式之前
    #[serde(default)]
    pub environment_filters: Vec<String>,
    /// 是否采集系统属性（附带内置过滤模式）
    #[serde(default)]
    pub include_system_properties: bool,
    /// backtrace 最多保留的栈帧数，未设置时保留全部
    pub max_backtrace_frames: Option<usize>,
}

fn default_environment_name() -> String {
    DEFAULT_ENVIRONMENT_NAME.to_string()
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            environment_name: default_environment_name(),
            project_root: None,
            environment_filters: Vec::new(),
            include_system_properties: false,
            max_backtrace_frames: None,
        }
    }
}

impl NoticeConfig {
    /// 创建默认配置
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: NoticeConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// 设置环境名
    pub fn with_environment_name(mut self, name: impl Into<String>) -> Self {
        self.environment_name = name.into();
        self
    }

    /// 设置项目根路径
    pub fn with_project_root(mut self, root: impl Into<String>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    /// 追加过滤模式
    pub fn with_environment_filter(mut self, pattern: impl Into<String>) -> Self {
        self.environment_filters.push(pattern.into());
        self
    }

    /// 启用/禁用系统属性采集
    pub fn with_system_properties(mut self, enable: bool) -> Self {
        self.include_system_properties = enable;
        self
    }

    /// 设置 backtrace 栈帧上限
    pub fn with_max_backtrace_frames(mut self, max: usize) -> Self {
        self.max_backtrace_frames = Some(max);
        self
    }
}
