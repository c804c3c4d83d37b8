//! Full integration tests layering several sources into one chain.

use layered_config::prelude::*;
use layered_config::sources::{EnvSource, FileSource};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn leaf<const N: usize>(entries: [(&str, &str); N]) -> Arc<dyn Configuration> {
    Arc::new(LeafConfiguration::new(FlatStore::from(entries)))
}

#[tokio::test]
async fn test_builder_layers_all_sources() {
    let temp_dir = TempDir::new().unwrap();
    let default_path = temp_dir.path().join("default.properties");
    let site_path = temp_dir.path().join("site.properties");
    let secrets_dir = temp_dir.path().join("secrets");

    fs::write(
        &default_path,
        "server.port = 8080\n\
         server.host = localhost\n\
         db.url = postgres://localhost/app\n\
         db.password = changeme\n\
         features.metrics = disabled\n",
    )
    .unwrap();
    fs::write(&site_path, "server.port = 9090\nfeatures.metrics = enabled\n").unwrap();
    fs::create_dir(&secrets_dir).unwrap();
    fs::write(secrets_dir.join("db.password"), "s3cr3t\n").unwrap();

    let config = ConfigurationBuilder::new()
        .with_file(&default_path)
        .with_file(&site_path)
        .with_secrets_directory(&secrets_dir)
        .with_source(EnvSource::from_vars([("server.host", "0.0.0.0")]))
        .build()
        .await
        .unwrap();

    assert_eq!(config.items().len(), 4);

    let server = config.get_namespace("server").unwrap();
    assert_eq!(server.get_integer("port").unwrap(), 9090); // Site file
    assert_eq!(server.get_string("host").unwrap(), "0.0.0.0"); // Env snapshot

    let db = config.get_namespace("db").unwrap();
    assert_eq!(db.get_string("password").unwrap(), "s3cr3t"); // Secrets directory
    assert_eq!(db.get_url("url").unwrap().scheme(), "postgres"); // Default file

    assert!(config.get_enabled("features.metrics").unwrap());
}

#[cfg(feature = "toml")]
#[tokio::test]
async fn test_builder_mixes_toml_and_properties() {
    let temp_dir = TempDir::new().unwrap();
    let toml_path = temp_dir.path().join("base.toml");
    let props_path = temp_dir.path().join("override.properties");

    fs::write(
        &toml_path,
        r#"
[cache]
ttl = 30
hosts = ["a", "b"]
"#,
    )
    .unwrap();
    fs::write(&props_path, "cache.ttl = 60\n").unwrap();

    let config = ConfigurationBuilder::new()
        .with_file(&toml_path)
        .with_file(&props_path)
        .build()
        .await
        .unwrap();

    assert_eq!(config.get_integer("cache.ttl").unwrap(), 60);
    let hosts: Vec<_> = config
        .get_namespace("cache.hosts")
        .unwrap()
        .keys()
        .to_vec();
    assert_eq!(hosts.len(), 3); // 0, 1, indexer
}

#[tokio::test]
async fn test_builder_reports_failing_source() {
    let err = ConfigurationBuilder::new()
        .with_source(FileSource::new("/nonexistent/config.properties"))
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigError::LoadError(_)));
    assert!(err.to_string().contains("/nonexistent/config.properties"));
}

#[test]
fn test_sub_configuration_keys_in_chain() {
    let config1 = leaf([("a.b1", "b1value"), ("a.b2", "b2value")]);
    let config2 = leaf([("a.b1", "b1valueOverride"), ("a.b3", "b3value")]);
    let config = chain_configuration([config2, config1]).unwrap();

    let mut keys = config.keys().to_vec();
    keys.sort();
    assert_eq!(keys, vec!["a.b1", "a.b2", "a.b3"]);

    let sub = config.get_namespace("a").unwrap();
    let mut keys = sub.keys().to_vec();
    keys.sort();
    assert_eq!(keys, vec!["b1", "b2", "b3"]);
    assert_eq!(sub.get_string("b1").unwrap(), "b1valueOverride");
}

#[test]
fn test_sub_configuration_error_has_full_key() {
    let config1 = leaf([("a.url", "http://localhost:9090")]);
    let config2 = leaf([("a.url", "http://localhost:8080")]);
    let config = chain_configuration([config2, config1]).unwrap();
    let sub = config.get_namespace("a").unwrap();

    let err = sub.get_url("wrongKey").unwrap_err();
    assert!(err.to_string().contains("a.wrongKey"));
}

#[test]
fn test_mask_namespace_in_chain() {
    let config1 = leaf([("a.ssl.ca", "/path/to/ca.crt")]);
    let config2 = leaf([("a.ssl", "")]); // Mask namespace "a.ssl"
    let config = chain_configuration([config2, config1]).unwrap();

    assert!(!config.has_namespace("a.ssl").unwrap());
    assert!(config.has("a.ssl.ca").unwrap());
}

#[test]
fn test_chain_type_mismatch_is_not_a_miss() {
    let config = chain_configuration([leaf([("k", "notanumber")]), leaf([("k", "42")])]).unwrap();
    let err = config.get_integer("k").unwrap_err();
    assert!(matches!(err, ConfigError::BadType { ref key, .. } if key == "k"));
}

#[test]
fn test_nested_chains_keep_full_paths() {
    let inner: Arc<dyn Configuration> = Arc::new(
        chain_configuration([leaf([("svc.a.b.c.url", "not a url")]), leaf([("svc.x", "1")])])
            .unwrap(),
    );
    let outer = chain_configuration([leaf([("other", "1")]), inner]).unwrap();

    let c = outer
        .get_namespace("svc")
        .unwrap()
        .get_namespace("a.b")
        .unwrap()
        .get_namespace("c")
        .unwrap();
    let err = c.get_url("url").unwrap_err();
    assert!(err.is_bad_type());
    assert!(err.to_string().contains("svc.a.b.c.url"));
}
