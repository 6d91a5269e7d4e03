//! 请求上下文提取测试

use flare_notice::{
    CapturedError, Diagnostic, NoticeBuilder, NoticeValue, RecordingSink, RequestSnapshot,
    SessionSnapshot,
};
use std::sync::Arc;

/// 创建测试用的请求
fn create_test_request() -> RequestSnapshot {
    RequestSnapshot::new("/shop/orders/17")
        .with_query_string("q=x&tag=a&tag=b")
        .with_context_path("/shop")
        .with_parameter("q", ["x"])
        .with_parameter("tag", ["a", "b"])
        .with_parameter("empty", Vec::<String>::new())
}

/// 测试：URL、component 与项目根路径
#[test]
fn test_request_url_component_and_root() {
    let mut builder = NoticeBuilder::new("key", "boom").unwrap();
    builder.set_request_context(&create_test_request());

    let notice = builder.build();
    assert!(notice.has_request());
    assert_eq!(notice.url(), Some("/shop/orders/17"));
    assert_eq!(notice.component(), Some("q=x&tag=a&tag=b"));
    assert_eq!(notice.project_root(), Some("/shop"));
}

/// 测试：URL 不含查询串
#[test]
fn test_request_url_strips_query() {
    let mut builder = NoticeBuilder::new("key", "boom").unwrap();
    builder.set_request_context(&RequestSnapshot::new("/a/b?c=d").with_query_string("c=d"));
    assert_eq!(builder.build().url(), Some("/a/b"));
}

/// 测试：绝对 URI 只保留路径部分
#[test]
fn test_request_url_strips_scheme_and_authority() {
    for (uri, expected) in [
        ("https://h/p?x", "/p"),
        ("http://shop.example:8080/cart/items#top", "/cart/items"),
        ("https://h", "/"),
        ("https://h?x=1", "/"),
        ("/plain/path#frag", "/plain/path"),
    ] {
        let mut builder = NoticeBuilder::new("key", "boom").unwrap();
        builder.set_request_context(&RequestSnapshot::new(uri));
        assert_eq!(builder.build().url(), Some(expected), "uri {uri}");
    }
}

/// 测试：已有项目根路径时不被覆盖
#[test]
fn test_project_root_not_overwritten() {
    let error = CapturedError::new("app::Error", Some("boom".to_string()));
    let mut builder =
        NoticeBuilder::from_error_with_project_root("key", &error, "/srv/app", "prod").unwrap();
    builder.set_request_context(&create_test_request());
    assert_eq!(builder.build().project_root(), Some("/srv/app"));
}

/// 测试：单值、多值与无值参数
#[test]
fn test_request_parameters() {
    let mut builder = NoticeBuilder::new("key", "boom").unwrap();
    builder.set_request_context(&create_test_request());

    let notice = builder.build();
    let request = notice.request();
    assert_eq!(request.get("q"), Some(&NoticeValue::from("x")));
    assert_eq!(
        request.get("tag"),
        Some(&NoticeValue::from(vec!["a".to_string(), "b".to_string()]))
    );
    assert!(!request.contains_key("empty"));
    assert_eq!(request.keys().collect::<Vec<_>>(), vec!["q", "tag"]);
}

/// 测试：大量不同参数名按出现顺序提取
#[test]
fn test_many_distinct_parameters() {
    let mut request = RequestSnapshot::new("/search");
    for i in 0..20_000 {
        request = request.with_parameter_value(format!("p{i}"), i.to_string());
    }
    request = request.with_parameter_value("p7", "again");

    let mut builder = NoticeBuilder::new("key", "boom").unwrap();
    builder.set_request_context(&request);

    let notice = builder.build();
    let params = notice.request();
    assert_eq!(params.len(), 20_000);
    assert_eq!(params.keys().next(), Some("p0"));
    assert_eq!(params.keys().last(), Some("p19999"));
    assert_eq!(params.get("p19999"), Some(&NoticeValue::from("19999")));
    assert_eq!(
        params.get("p7"),
        Some(&NoticeValue::from(vec!["7".to_string(), "again".to_string()]))
    );
}

/// 测试：请求参数整体替换
#[test]
fn test_request_parameters_replaced_wholesale() {
    let mut builder = NoticeBuilder::new("key", "boom").unwrap();
    builder.set_request_context(&create_test_request());
    builder.set_request_context(&RequestSnapshot::new("/other").with_parameter("page", ["2"]));

    let notice = builder.build();
    assert_eq!(notice.request().keys().collect::<Vec<_>>(), vec!["page"]);
    assert_eq!(notice.component(), None);
}

/// 测试：session 只保留标量，非标量丢弃并记录诊断
#[test]
fn test_session_scalars_only() {
    let sink = Arc::new(RecordingSink::new());
    let request = create_test_request().with_session(
        SessionSnapshot::new()
            .with_attribute("user", "alice")
            .with_attribute("visits", 12)
            .with_attribute("cart", NoticeValue::opaque("shop::Cart"))
            .with_attribute("roles", vec!["admin".to_string()])
            .with_attribute("admin", true),
    );

    let mut builder = NoticeBuilder::new("key", "boom")
        .unwrap()
        .with_diagnostics(sink.clone());
    builder.set_request_context(&request);

    let notice = builder.build();
    let session = notice.session();
    assert_eq!(session.keys().collect::<Vec<_>>(), vec!["user", "visits"]);
    assert_eq!(session.get("user"), Some(&NoticeValue::from("alice")));
    assert_eq!(session.get("visits"), Some(&NoticeValue::from(12)));

    let dropped: Vec<String> = sink
        .events()
        .into_iter()
        .filter_map(|event| match event {
            Diagnostic::DroppedSessionAttribute { name, .. } => Some(name),
            _ => None,
        })
        .collect();
    assert_eq!(dropped, vec!["cart", "roles", "admin"]);
}

/// 测试：真实 session 整体替换已有 session 数据
#[test]
fn test_session_replaced_by_request_session() {
    let mut builder = NoticeBuilder::new("key", "boom").unwrap();
    builder.add_session_data([("stale", "value")]);
    builder.set_request_context(
        &create_test_request().with_session(SessionSnapshot::new().with_attribute("user", "bob")),
    );

    let notice = builder.build();
    assert!(!notice.session().contains_key("stale"));
    assert_eq!(notice.session().get("user"), Some(&NoticeValue::from("bob")));
}

/// 测试：没有 session 时保留已有数据
#[test]
fn test_session_kept_without_request_session() {
    let mut builder = NoticeBuilder::new("key", "boom").unwrap();
    builder.add_session_data([("kept", "value")]);
    builder.set_request_context(&create_test_request());

    assert!(builder.build().session().contains_key("kept"));
}

/// 测试：构造时直接提取请求
#[test]
fn test_from_error_with_request() {
    let error = CapturedError::new("app::Error", Some("boom".to_string()));
    let notice =
        NoticeBuilder::from_error_with_request("key", &error, "prod", &create_test_request())
            .unwrap()
            .build();

    assert!(notice.has_request());
    assert_eq!(notice.environment_name(), "prod");
    assert_eq!(notice.request().get("q"), Some(&NoticeValue::from("x")));
}
