//! 配置加载与基于配置的构建测试

use flare_notice::{CapturedError, ErrorCode, NoticeBuilder, NoticeConfig, NoticeError, StackFrame};
use std::io::Write;

fn sample_error() -> CapturedError {
    CapturedError::new("app::Error", Some("boom".to_string())).with_frames(vec![
        StackFrame::new("app::a"),
        StackFrame::new("app::b"),
        StackFrame::new("app::c"),
    ])
}

/// 测试：从 TOML 文件加载
#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
api_key = "abc"
environment_name = "production"
project_root = "/srv/app"
environment_filters = ["DATABASE_URL", "*_TOKEN"]
max_backtrace_frames = 2
"#
    )
    .unwrap();

    let config = NoticeConfig::load_from_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.api_key.as_deref(), Some("abc"));
    assert_eq!(config.environment_name, "production");
    assert_eq!(config.environment_filters, vec!["DATABASE_URL", "*_TOKEN"]);
    assert!(!config.include_system_properties);
    assert_eq!(config.max_backtrace_frames, Some(2));
}

/// 测试：缺省字段使用默认值
#[test]
fn test_defaults() {
    let config = NoticeConfig::from_toml_str(r#"api_key = "abc""#).unwrap();
    assert_eq!(config.environment_name, "test");
    assert!(config.environment_filters.is_empty());
    assert_eq!(config.project_root, None);
}

/// 测试：无效配置与缺失文件
#[test]
fn test_invalid_config() {
    let err = NoticeConfig::from_toml_str("api_key = [").unwrap_err();
    assert_eq!(err.code(), ErrorCode::ConfigurationError);

    let err = NoticeConfig::load_from_file("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, NoticeError::Io(_)));
}

/// 测试：由配置构建
#[test]
fn test_builder_from_config() {
    let config = NoticeConfig::new("abc")
        .with_environment_name("production")
        .with_project_root("/srv/app")
        .with_environment_filter("DATABASE_URL")
        .with_max_backtrace_frames(2);

    let notice = NoticeBuilder::from_config(&config, &sample_error())
        .unwrap()
        .build();
    assert_eq!(notice.api_key(), "abc");
    assert_eq!(notice.environment_name(), "production");
    assert_eq!(notice.project_root(), Some("/srv/app"));
    assert_eq!(notice.environment_filters(), ["DATABASE_URL"]);
    assert_eq!(notice.backtrace(), ["app::a", "app::b"]);
}

/// 测试：配置中的过滤模式排在系统属性模式之前
#[test]
fn test_builder_from_config_with_system_properties() {
    let config = NoticeConfig::new("abc")
        .with_environment_filter("DATABASE_URL")
        .with_system_properties(true);

    let notice = NoticeBuilder::from_config(&config, &sample_error())
        .unwrap()
        .build();
    assert_eq!(notice.environment_filters()[0], "DATABASE_URL");
    assert_eq!(notice.environment_filters().len(), 9);
    assert!(notice.environment().contains_key("os.arch"));
}

/// 测试：配置缺少 API key
#[test]
fn test_builder_from_config_requires_api_key() {
    let err = NoticeBuilder::from_config(&NoticeConfig::default(), &sample_error()).unwrap_err();
    assert_eq!(err, NoticeError::MissingApiKey);
}
