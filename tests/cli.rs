use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const POD: &str = r#"
apiVersion: v1
kind: Pod
metadata:
  name: test-pod
spec:
  containers:
  - name: test-container
    image: test-image
"#;

const TWO_PODS: &str = r#"
apiVersion: v1
kind: Pod
metadata:
  name: test-pod
spec:
  containers:
  - name: test-container
    image: test-image
---
apiVersion: v1
kind: Pod
metadata:
  name: another-pod
spec:
  containers:
  - name: another-container
    image: another-image
"#;

const SERVICE: &str = r#"
apiVersion: v1
kind: Service
metadata:
  name: web
spec:
  ports:
  - port: 80
"#;

/// A `kir` command isolated from any config in the real home directory.
fn kir(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kir").unwrap();
    cmd.current_dir(dir).env("HOME", dir).env_remove("RUST_LOG");
    cmd
}

fn workspace() -> TempDir {
    tempfile::tempdir().unwrap()
}

#[test]
fn test_single_file() {
    let dir = workspace();
    fs::write(dir.path().join("test.yaml"), POD).unwrap();

    kir(dir.path())
        .arg("test.yaml")
        .assert()
        .success()
        .stdout("test-image\n");
}

#[test]
fn test_stdin() {
    let dir = workspace();
    kir(dir.path())
        .arg("-")
        .write_stdin(TWO_PODS)
        .assert()
        .success()
        .stdout("test-image\nanother-image\n");
}

#[test]
fn test_directory_and_glob() {
    let dir = workspace();
    let manifests = dir.path().join("manifests");
    fs::create_dir(&manifests).unwrap();
    fs::write(manifests.join("a.yaml"), POD).unwrap();
    fs::write(manifests.join("b.yaml"), TWO_PODS).unwrap();

    kir(dir.path())
        .arg("manifests")
        .assert()
        .success()
        .stdout("test-image\ntest-image\nanother-image\n");

    kir(dir.path())
        .arg("manifests/b*.yaml")
        .assert()
        .success()
        .stdout("test-image\nanother-image\n");
}

#[test]
fn test_json_output() {
    let dir = workspace();
    fs::write(dir.path().join("pods.yaml"), TWO_PODS).unwrap();

    let output = kir(dir.path())
        .args(["--json", "pods.yaml"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let images: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(images, vec!["test-image", "another-image"]);
}

#[test]
fn test_unsupported_kind_fails_file_but_continues() {
    let dir = workspace();
    fs::write(dir.path().join("a-service.yaml"), SERVICE).unwrap();
    fs::write(dir.path().join("b-pod.yaml"), POD).unwrap();

    kir(dir.path())
        .args(["a-service.yaml", "b-pod.yaml"])
        .assert()
        .failure()
        .stdout("test-image\n")
        .stderr(predicate::str::contains("unsupported kind Service"));
}

#[test]
fn test_tolerant_skips_bad_documents() {
    let dir = workspace();
    let mixed = format!("{}---\n{}", SERVICE, POD);
    fs::write(dir.path().join("mixed.yaml"), &mixed).unwrap();

    kir(dir.path())
        .arg("mixed.yaml")
        .assert()
        .failure()
        .stdout("");

    kir(dir.path())
        .args(["--tolerant", "mixed.yaml"])
        .assert()
        .success()
        .stdout("test-image\n");
}

#[test]
fn test_config_enables_tolerant_mode() {
    let dir = workspace();
    let mixed = format!("{}---\n{}", SERVICE, POD);
    fs::write(dir.path().join("mixed.yaml"), &mixed).unwrap();
    fs::write(dir.path().join(".kir.toml"), "tolerant = true\n").unwrap();

    kir(dir.path())
        .arg("mixed.yaml")
        .assert()
        .success()
        .stdout("test-image\n");
}

#[test]
fn test_bad_explicit_config_is_fatal() {
    let dir = workspace();
    fs::write(dir.path().join("pod.yaml"), POD).unwrap();
    fs::write(dir.path().join("custom.toml"), "extensions = 5\n").unwrap();

    kir(dir.path())
        .args(["--config", "custom.toml", "pod.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn test_stdin_failure_is_fatal() {
    let dir = workspace();
    kir(dir.path())
        .arg("-")
        .write_stdin(SERVICE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported kind Service"));
}

#[test]
fn test_list_document() {
    let dir = workspace();
    let list = r#"
apiVersion: v1
kind: List
items:
- apiVersion: apps/v1
  kind: Deployment
  metadata:
    name: web
  spec:
    template:
      spec:
        containers:
        - name: web
          image: web:2
        initContainers:
        - name: migrate
          image: migrate:2
- apiVersion: batch/v1
  kind: CronJob
  metadata:
    name: report
  spec:
    schedule: "@daily"
    jobTemplate:
      spec:
        template:
          spec:
            containers:
            - name: report
              image: report:1
"#;
    fs::write(dir.path().join("list.yaml"), list).unwrap();

    kir(dir.path())
        .arg("list.yaml")
        .assert()
        .success()
        .stdout("web:2\nmigrate:2\nreport:1\n");
}

#[test]
fn test_requires_a_path() {
    let dir = workspace();
    kir(dir.path()).assert().failure();
}
