#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A throwaway directory, optionally a Bazel workspace, plus a fake `bazel`.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates an empty temp directory (no workspace marker).
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a temp directory containing a `WORKSPACE` marker.
    pub fn workspace() -> Self {
        let fixture = Self::new();
        fixture.create_file("WORKSPACE", "");
        fixture
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Canonical path of the temp directory, as the binary reports it.
    pub fn path(&self) -> PathBuf {
        fs::canonicalize(self.dir.path()).expect("Failed to canonicalize temp directory")
    }

    pub fn join(&self, relative_path: &str) -> PathBuf {
        self.path().join(relative_path)
    }

    /// Arguments the fake tool received, one invocation per line.
    pub fn recorded_calls(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Writes a fake `bazel` that prints `query_output` for `query` and
    /// `build_stderr` on stderr for `build`, exiting with `build_exit`.
    /// Both outputs must be empty or end with a newline.
    #[cfg(unix)]
    pub fn fake_bazel(&self, query_output: &str, build_stderr: &str, build_exit: i32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let bin_dir = self.dir.path().join(".bin");
        fs::create_dir_all(&bin_dir).expect("Failed to create bin directory");
        let log = self.dir.path().join("calls.log");
        let script = format!(
            "#!/bin/sh\n\
             echo \"$*\" >> '{log}'\n\
             case \"$1\" in\n\
             query)\n\
             cat <<'QUERY'\n{query_output}QUERY\n\
             ;;\n\
             build)\n\
             cat >&2 <<'BUILD'\n{build_stderr}BUILD\n\
             exit {build_exit}\n\
             ;;\n\
             esac\n",
            log = log.display(),
        );
        let path = bin_dir.join("bazel");
        fs::write(&path, script).expect("Failed to write fake bazel");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake bazel executable");
        path
    }
}
