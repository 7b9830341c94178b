use otuserver::config::Config;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.document_root, PathBuf::from("."));
    assert_eq!(cfg.workers, 10);
    assert_eq!(cfg.max_header_bytes, 8192);
    assert_eq!(cfg.idle_timeout_secs, None);
}

#[test]
fn test_config_custom_address_from_env() {
    let mut cfg = Config::default();
    cfg.apply_env(env(&[("LISTEN", "0.0.0.0:3000")])).unwrap();

    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
}

#[test]
fn test_config_root_and_workers_from_env() {
    let mut cfg = Config::default();
    cfg.apply_env(env(&[("DOCUMENT_ROOT", "/srv/www"), ("WORKERS", "4")]))
        .unwrap();

    assert_eq!(cfg.document_root, PathBuf::from("/srv/www"));
    assert_eq!(cfg.workers, 4);
}

#[test]
fn test_config_invalid_workers_from_env() {
    let mut cfg = Config::default();

    assert!(cfg.apply_env(env(&[("WORKERS", "many")])).is_err());
    assert!(cfg.apply_env(env(&[("WORKERS", "0")])).is_err());
}

#[test]
fn test_config_flags() {
    let mut cfg = Config::default();
    cfg.apply_args(args(&["-r", "/var/www", "-w", "3"])).unwrap();

    assert_eq!(cfg.document_root, PathBuf::from("/var/www"));
    assert_eq!(cfg.workers, 3);
}

#[test]
fn test_config_flags_override_env() {
    let mut cfg = Config::default();
    cfg.apply_env(env(&[("DOCUMENT_ROOT", "/from/env")])).unwrap();
    cfg.apply_args(args(&["-r", "/from/flag"])).unwrap();

    assert_eq!(cfg.document_root, PathBuf::from("/from/flag"));
}

#[test]
fn test_config_bad_flags() {
    let mut cfg = Config::default();

    assert!(cfg.apply_args(args(&["-r"])).is_err());
    assert!(cfg.apply_args(args(&["-x", "1"])).is_err());
    assert!(cfg.apply_args(args(&["-w", "ten"])).is_err());
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml_str(
        "listen_addr: 0.0.0.0:5000\n\
         document_root: /srv/site\n\
         idle_timeout_secs: 30\n",
    )
    .unwrap();

    assert_eq!(cfg.listen_addr, "0.0.0.0:5000");
    assert_eq!(cfg.document_root, PathBuf::from("/srv/site"));
    assert_eq!(cfg.workers, 10);
    assert_eq!(cfg.limits().idle_timeout, Some(Duration::from_secs(30)));
}

#[test]
fn test_config_yaml_rejects_unknown_keys() {
    assert!(Config::from_yaml_str("threads: 4\n").is_err());
}

#[test]
fn test_config_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("otuserver.yaml");
    std::fs::write(&path, "max_header_bytes: 1024\nworkers: 2\n").unwrap();

    let cfg = Config::from_yaml_file(&path).unwrap();

    assert_eq!(cfg.limits().max_header_bytes, 1024);
    assert_eq!(cfg.workers, 2);
    assert!(Config::from_yaml_file(dir.path().join("missing.yaml")).is_err());
}

#[test]
fn test_config_document_root_is_canonical() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("site")).unwrap();

    let mut cfg = Config::default();
    cfg.document_root = dir.path().join("site/../site/.");
    let root = cfg.document_root().unwrap();

    assert!(root.path().is_absolute());
    assert_eq!(root.path(), std::fs::canonicalize(dir.path().join("site")).unwrap());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1, cfg2);
}
