//! 启动器集成测试
use inject_abstractions::{Invoker, Mapper, NamedInvoker};
use inject_composition::{RegistryBootstrapper, DEFAULT_ENV_PREFIX};
use std::io::Write;

#[derive(Debug, Clone)]
struct Greeting(String);

#[test]
fn test_bootstrap_from_toml_and_env() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(
        file,
        "[named]\nworkers = 4\nratio = 0.5\ngreeting = \"hi\"\nverbose = false"
    )?;

    let registry = RegistryBootstrapper::new()
        .add_config_toml(file.path())?
        .add_config_env_map(DEFAULT_ENV_PREFIX, [("INJECT_NAMED__WORKERS", "8")])
        .build()?;

    let (workers, ratio, verbose) = registry.invoke_named(
        |workers: usize, ratio: f32, verbose: bool| (workers, ratio, verbose),
        &["workers", "ratio", "verbose"],
    )?;
    assert_eq!(workers, 8);
    assert!((ratio - 0.5).abs() < f32::EPSILON);
    assert!(!verbose);

    let child = registry.child();
    child.map(Greeting("local".to_string()));
    let (local, configured) = child.invoke_named(
        |local: Greeting, configured: String| (local.0, configured),
        &["", "greeting"],
    )?;
    assert_eq!(local, "local");
    assert_eq!(configured, "hi");
    Ok(())
}

#[test]
fn test_empty_env_map() -> anyhow::Result<()> {
    let registry = RegistryBootstrapper::new()
        .add_config_env_map(DEFAULT_ENV_PREFIX, Vec::<(String, String)>::new())
        .build()?;
    assert_eq!(registry.named_len(), 0);
    assert!(registry.invoke(|| 1_u8).is_ok());
    Ok(())
}
