use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde_json::json;
use tempfile::TempDir;
use url::Url;

/// An isolated home directory plus a seeded `file://` catalog.
pub struct Sandbox {
    _dir: TempDir,
    pub home: PathBuf,
    pub service_url: String,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("catalog");
        let home = dir.path().join("home");
        std::fs::create_dir_all(&catalog).unwrap();
        std::fs::create_dir_all(&home).unwrap();

        seed_catalog(&catalog);

        let service_url = Url::from_directory_path(&catalog)
            .expect("Failed to convert path to file URL")
            .to_string();

        Self {
            _dir: dir,
            home,
            service_url,
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_pawsearch"));
        cmd.args(args);
        cmd.env("HOME", &self.home);
        cmd.env("XDG_DATA_HOME", self.home.join("data"));
        cmd.env("PAWSEARCH_SERVICE", &self.service_url);
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Run the CLI.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("Failed to execute CLI")
    }

    /// Run the CLI and expect success, returning stdout.
    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run the CLI with `input` on stdin.
    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> Output {
        let mut cmd = self.command(args);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn().expect("Failed to spawn CLI");
        child
            .stdin
            .take()
            .expect("Failed to open stdin")
            .write_all(input.as_bytes())
            .expect("Failed to write to stdin");
        child.wait_with_output().expect("Failed to wait for CLI")
    }

    pub fn login(&self) {
        self.run_success(&["login", "--name", "Ada", "--email", "ada@example.com"]);
    }
}

/// Eight Beagles, one Akita and one Pug.
fn seed_catalog(root: &Path) {
    let mut dogs: Vec<_> = (0..8)
        .map(|i| dog(&format!("beagle-{i}"), &format!("Beagle {i}"), "Beagle"))
        .collect();
    dogs.push(dog("akita-0", "Hachi", "Akita"));
    dogs.push(dog("pug-0", "Frank", "Pug"));

    let json = serde_json::to_string_pretty(&dogs).unwrap();
    std::fs::write(root.join("dogs.json"), json).unwrap();
}

fn dog(id: &str, name: &str, breed: &str) -> serde_json::Value {
    json!({
        "id": id,
        "img": format!("https://img.example.com/{id}.jpg"),
        "name": name,
        "age": 4,
        "zip_code": "60601",
        "breed": breed,
    })
}
