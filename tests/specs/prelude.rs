//! Shared helpers for specs: a fluent command runner and a scratch project.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Start a `tcr` invocation with colors off and user config isolated
pub fn cli() -> Cli {
    Cli { args: Vec::new(), cwd: None, env: Vec::new() }
}

pub struct Cli {
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env: Vec<(String, String)>,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn pwd(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    fn run(self) -> Output {
        let mut cmd = Command::cargo_bin("tcr").unwrap();
        cmd.args(&self.args)
            .env("NO_COLOR", "1")
            .env("TCR_CONFIG", "/nonexistent/tcr-specs/config.toml")
            .env_remove("TCR_LOG")
            .env_remove("RUST_LOG")
            .env_remove("TCR_WRITE_POLICY")
            .env_remove("TCR_RENAME_MODE");
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        for (k, v) in &self.env {
            cmd.env(k, v);
        }
        let out = cmd.output().unwrap();
        Output {
            code: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        }
    }

    /// Run and require exit code 0
    pub fn passes(self) -> Output {
        let out = self.run();
        assert_eq!(
            out.code,
            Some(0),
            "expected success\nstdout:\n{}\nstderr:\n{}",
            out.stdout,
            out.stderr
        );
        out
    }

    /// Run and require a specific non-zero exit code
    pub fn exits(self, code: i32) -> Output {
        let out = self.run();
        assert_eq!(
            out.code,
            Some(code),
            "unexpected exit\nstdout:\n{}\nstderr:\n{}",
            out.stdout,
            out.stderr
        );
        out
    }
}

pub struct Output {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Output {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }
}

/// Scratch directory for one spec
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, relative: &str, content: &str) -> PathBuf {
        self.bytes(relative, content.as_bytes())
    }

    pub fn bytes(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(relative)).unwrap()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.dir.path().join(relative).exists()
    }

    pub fn git(&self, args: &[&str]) {
        let status = std::process::Command::new("git")
            .arg("-C")
            .arg(self.dir.path())
            .args(["-c", "user.email=specs@example.com", "-c", "user.name=specs"])
            .args(args)
            .env_remove("GIT_DIR")
            .env_remove("GIT_WORK_TREE")
            .status()
            .unwrap();
        assert!(status.success(), "git {args:?} failed");
    }

    pub fn git_init(&self) {
        self.git(&["init", "-q"]);
    }
}

/// Patch bytes builder for handcrafted inputs
#[derive(Default)]
pub struct PatchBytes {
    bytes: Vec<u8>,
}

impl PatchBytes {
    pub fn new() -> Self {
        Self::default()
    }

    fn name(mut self, name: &str) -> Self {
        self.bytes.extend_from_slice(&(name.len() as u16).to_be_bytes());
        self.bytes.extend_from_slice(name.as_bytes());
        self
    }

    pub fn created(mut self, name: &str, content: &[u8]) -> Self {
        self.bytes.push(26);
        self = self.name(name);
        self.bytes.extend_from_slice(&(content.len() as u64).to_be_bytes());
        self.bytes.extend_from_slice(content);
        self
    }

    pub fn deleted(mut self, name: &str) -> Self {
        self.bytes.push(3);
        self.name(name)
    }

    pub fn renamed(mut self, prev: &str, new: &str) -> Self {
        self.bytes.push(19);
        self.name(prev).name(new)
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn end(self) -> Vec<u8> {
        self.raw(&[10, 0, 0]).bytes
    }
}
