use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

/// Route table used by the reference scenarios
#[allow(dead_code)]
pub const TOWNS: &str = "AB5, BC4, CD8, DC8, DE6, AD5, CE2, EB3, AE7";

/// Get a Command for trains with config lookup isolated to `config_dir`
pub fn trains(config_dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("trains");
    cmd.env("TRAINS_CONFIG_DIR", config_dir)
        .env_remove("TRAINS_CONFIG")
        .env_remove("RUST_LOG")
        .env_remove("TRAINS_LOG");
    cmd
}

/// Write `content` to `dir/name` and return the path
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write test file");
    path
}

/// Write the reference route table into `dir`
#[allow(dead_code)]
pub fn towns_file(dir: &Path) -> PathBuf {
    write_file(dir, "routes.txt", &format!("# Town graph\n{TOWNS}\n"))
}
