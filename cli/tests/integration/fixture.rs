//! Throwaway bot projects on disk for driving the real binary.
//!
//! The fake interpreter is a shell script that appends one line per call to
//! `calls.log` in the project root: `$VIRTUAL_ENV|<args>`.

#![allow(clippy::expect_used, dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// `botstrap` with color off and config isolated under `config_dir`.
pub fn botstrap(config_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("botstrap"));
    cmd.env("NO_COLOR", "1")
        .env("BOTSTRAP_CONFIG", config_dir.join("config.yaml"))
        .env_remove("BOTSTRAP_PROJECT_ROOT")
        .env_remove("BOTSTRAP_LOG")
        .env_remove("DISCORD_BOT_TOKEN")
        .env_remove("DATABASE_URL");
    cmd
}

pub struct BotProject {
    pub dir: TempDir,
    pub config_dir: TempDir,
}

impl BotProject {
    /// Empty project directory.
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("project dir"),
            config_dir: TempDir::new().expect("config dir"),
        }
    }

    /// Environment, requirements, and entry point; installer and program exit 0.
    pub fn ready() -> Self {
        let project = Self::empty();
        project.write("requirements.txt", "discord.py>=2.3\n");
        project.write("main.py", "print('bot')\n");
        project.with_environment(0, 0)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.root().join(name), content).expect("write project file");
    }

    pub fn remove(&self, name: &str) {
        std::fs::remove_file(self.root().join(name)).expect("remove project file");
    }

    /// Install `venv/bin/{activate,python}`; the fake python exits with
    /// `pip_code` for pip calls and `program_code` otherwise.
    #[cfg(unix)]
    pub fn with_environment(self, pip_code: i32, program_code: i32) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.root().join("venv").join("bin");
        std::fs::create_dir_all(&bin).expect("venv/bin");
        std::fs::write(bin.join("activate"), "# activate\n").expect("activate");

        let log = self.calls_log();
        let script = format!(
            "#!/bin/sh\n\
             echo \"$VIRTUAL_ENV|$*\" >> '{log}'\n\
             case \"$*\" in\n  \
               --version) echo 'Python 3.12.1'; exit 0 ;;\n  \
               *pip*) exit {pip_code} ;;\n\
             esac\n\
             exit {program_code}\n",
            log = log.display()
        );
        let python = bin.join("python");
        std::fs::write(&python, script).expect("python");
        std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755))
            .expect("chmod python");
        self
    }

    #[cfg(not(unix))]
    pub fn with_environment(self, _pip_code: i32, _program_code: i32) -> Self {
        let scripts = self.root().join("venv").join("Scripts");
        std::fs::create_dir_all(&scripts).expect("venv/Scripts");
        std::fs::write(scripts.join("activate.bat"), "@echo off\n").expect("activate");
        self
    }

    pub fn venv(&self) -> PathBuf {
        self.root().join("venv")
    }

    pub fn calls_log(&self) -> PathBuf {
        self.root().join("calls.log")
    }

    /// Lines the fake interpreter logged, in call order.
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.calls_log())
            .unwrap_or_default()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    /// `botstrap --project-root <root>` with isolated config.
    pub fn cmd(&self) -> Command {
        let mut cmd = botstrap(self.config_dir.path());
        cmd.arg("--project-root").arg(self.root());
        cmd
    }
}
