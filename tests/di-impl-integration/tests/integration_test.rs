//! 注册表集成测试
use inject_abstractions::{Callable, Injector, Invoker, Mapper, NamedInvoker, NamedMapper};
use inject_common::{Binding, InjectError, TypeInfo, UsageError, Value};
use inject_impl::Registry;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 测试配置
#[derive(Debug, Clone, PartialEq)]
struct Config {
    port: u16,
}

/// 测试服务接口
trait Store: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

struct MemoryStore;

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        (key == "motd").then(|| "welcome".to_string())
    }
}

#[test]
fn test_child_invokes_with_parent_value() -> anyhow::Result<()> {
    let root = Registry::root();
    root.map(Config { port: 8080 });

    let child = root.child();
    let port = child.invoke(|config: Config| config.port)?;
    assert_eq!(port, 8080);
    assert_eq!(child.len(), 0);
    Ok(())
}

#[test]
fn test_named_value_is_widened() -> anyhow::Result<()> {
    let registry = Registry::root();
    registry.set_named_value("timeout", Value::new(5_i32));

    let timeout = registry.invoke_named(|timeout: i64| timeout, &["timeout"])?;
    assert_eq!(timeout, 5_i64);
    Ok(())
}

#[test]
fn test_name_count_mismatch_is_usage_error() {
    let registry = Registry::root();
    registry.map_named(1_i32, "a");

    let error = registry
        .invoke_named(|a: i32, b: i32| a + b, &["a"])
        .unwrap_err();
    assert!(error.is_usage());
    assert_eq!(
        error,
        InjectError::Usage(UsageError::NameCountMismatch {
            expected: 2,
            actual: 1,
        })
    );
}

#[test]
fn test_missing_dependency_does_not_call() {
    let registry = Registry::root();
    let calls = AtomicUsize::new(0);

    let error = registry
        .invoke(|_config: Config| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap_err();

    assert!(error.is_missing_dependency());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_three_level_chain() -> anyhow::Result<()> {
    let root = Registry::root();
    root.map(Config { port: 1 });
    root.map_named("root".to_string(), "origin");

    let middle = root.child();
    middle.map(Config { port: 2 });

    let leaf = middle.child();
    let (port, origin) = leaf.invoke_named(
        |config: Config, origin: String| (config.port, origin),
        &["", "origin"],
    )?;
    assert_eq!(port, 2);
    assert_eq!(origin, "root");

    let mut config = Config { port: 0 };
    assert!(root.get(&mut config));
    assert_eq!(config.port, 1);
    Ok(())
}

#[test]
fn test_interface_mapping_through_child() -> anyhow::Result<()> {
    let root = Registry::root();
    root.map_to::<dyn Store>(Arc::new(MemoryStore))?;

    let child = root.child();
    let motd = child.invoke(|store: Arc<dyn Store>| store.get("motd"))?;
    assert_eq!(motd.as_deref(), Some("welcome"));
    Ok(())
}

#[test]
fn test_parent_as_trait_object() -> anyhow::Result<()> {
    let root = Registry::root();
    let parent: &dyn Injector = &root;
    let child = Registry::new(Some(parent));

    root.map(Config { port: 9090 });
    assert!(child.get_value(&TypeInfo::of::<Config>()).is_some());

    let callable = Callable::new(|config: Config| config.port);
    let output = parent.invoke_callable(&callable)?;
    assert_eq!(output.downcast::<u16>(), Some(9090));
    Ok(())
}

#[test]
fn test_stored_callable_invoked_by_name() -> anyhow::Result<()> {
    let registry = Registry::root();
    registry.map_named(3_u8, "retries");
    registry.map_named(
        Callable::new(|retries: u32| format!("retry x{}", retries)),
        "describe",
    );

    let describe = registry
        .get_named_value("describe")
        .ok_or_else(|| anyhow::anyhow!("describe 未注册"))?;
    let output = registry.invoke_value_named(&describe, &["retries"])?;
    assert_eq!(output.downcast::<String>().as_deref(), Some("retry x3"));
    Ok(())
}

#[test]
fn test_narrowing_overflow_is_rejected() {
    let registry = Registry::root();
    registry.map_named(300_i64, "level");

    let error = registry
        .invoke_named(|level: u8| level, &["level"])
        .unwrap_err();
    assert!(error.is_unsupported_conversion());
}

#[test]
fn test_missing_name_reports_position() {
    let registry = Registry::root();
    registry.map(Config { port: 1 });

    let error = registry
        .invoke_named(|_config: Config, _host: String| (), &["", "host"])
        .unwrap_err();
    assert_eq!(
        error,
        InjectError::MissingDependency {
            position: 1,
            binding: Binding::Named("host".to_string()),
        }
    );
}

#[test]
fn test_concurrent_readers_and_writer() {
    let registry = Registry::root();
    registry.map(Config { port: 1 });

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..100 {
                    let port = registry.invoke(|config: Config| config.port).unwrap();
                    assert!(port >= 1);
                }
            });
        }
        scope.spawn(|| {
            for port in 1..=100 {
                registry.map(Config { port });
            }
        });
    });

    let mut config = Config { port: 0 };
    assert!(registry.get(&mut config));
    assert_eq!(config.port, 100);
}
