// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helper utilities for filesystem-based integration tests.

use counterparts::service::{LoaderOptions, LoaderOptionsBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Installs a test subscriber once so `RUST_LOG=debug cargo test` shows loader traces.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A scratch directory tree with a fake home and a working directory.
pub struct Sandbox {
    dir: TempDir,
}

#[allow(dead_code)]
impl Sandbox {
    pub fn new() -> Self {
        init_tracing();
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("home")).unwrap();
        fs::create_dir_all(dir.path().join("work")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    pub fn work(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    /// Writes `content` to `relative` under the sandbox root, creating parent dirs.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// A builder with the sandbox's home and working directory injected.
    pub fn builder(&self) -> LoaderOptionsBuilder {
        LoaderOptions::builder()
            .with_home_dir(self.home())
            .with_working_dir(self.work())
    }

    pub fn options(&self) -> LoaderOptions {
        self.builder().build().unwrap()
    }
}
