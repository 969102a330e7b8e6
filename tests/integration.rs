//! Integration tests for fwdlist.
//!
//! These run the compiled binary and never touch the real list: network
//! failures are provoked against a closed or a stalled local port.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Helper to get the path to the compiled binary
fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_fwdlist"))
}

/// Run fwdlist command and return output
fn run_fwdlist(args: &[&str]) -> std::process::Output {
    let binary = get_binary_path();
    Command::new(&binary)
        .args(args)
        .output()
        .expect("Failed to execute fwdlist")
}

/// A local port nothing listens on
fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// A local port that accepts connections and never answers
fn stalled_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    std::thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    port
}

/// Config pointing the list at a closed port and both outputs into `dir`
fn write_unreachable_config(dir: &Path) -> PathBuf {
    write_config(dir, closed_port())
}

/// Config with the list on `127.0.0.1:<port>`, a 1 s fetch timeout and both
/// outputs in `dir`
fn write_config(dir: &Path, port: u16) -> PathBuf {
    let config = format!(
        "source_url: \"https://127.0.0.1:{}/gfwlist.txt\"\n\
         fetch_timeout_secs: 1\n\
         forward:\n  output: \"{}\"\n\
         address_list:\n  output: \"{}\"\n",
        port,
        dir.join("fwd.rsc").display(),
        dir.join("ips.rsc").display()
    );
    let path = dir.join("config.yaml");
    std::fs::write(&path, config).unwrap();
    path
}

#[test]
fn test_version_command() {
    let output = run_fwdlist(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("fwdlist {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_command() {
    let output = run_fwdlist(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("forward"));
    assert!(stdout.contains("address-list"));
    assert!(stdout.contains("--config"));
}

#[test]
fn test_address_list_help_lists_resolvers() {
    let output = run_fwdlist(&["address-list", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("doh"));
    assert!(stdout.contains("system"));
    assert!(stdout.contains("nameserver"));
}

#[test]
fn test_config_command_prints_loadable_template() {
    let output = run_fwdlist(&["config"]);
    assert!(output.status.success());

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, &output.stdout).unwrap();

    let config = fwdlist::Config::load(&path).unwrap();
    assert_eq!(config.address_list.list_name, "ProxyRouteIPs");
    assert_eq!(config.forward.forward_to, vec!["8.8.8.8", "8.8.4.4"]);
}

#[test]
fn test_forward_fetch_failure_exits_1_without_output() {
    let dir = TempDir::new().unwrap();
    let config = write_unreachable_config(dir.path());

    let output = run_fwdlist(&["--config", config.to_str().unwrap(), "forward"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("fwd.rsc").exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to download domain list"), "stderr: {}", stderr);
}

#[test]
fn test_forward_fetch_timeout_exits_1_without_output() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), stalled_port());

    let started = std::time::Instant::now();
    let output = run_fwdlist(&["--config", config.to_str().unwrap(), "forward"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(started.elapsed() < std::time::Duration::from_secs(20));
    assert!(!dir.path().join("fwd.rsc").exists());
}

#[test]
fn test_default_command_fetch_failure_exits_1_without_output() {
    let dir = TempDir::new().unwrap();
    let config = write_unreachable_config(dir.path());

    let output = run_fwdlist(&["--config", config.to_str().unwrap(), "-q"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("ips.rsc").exists());
}

#[test]
fn test_invalid_config_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "source_url: \"http://insecure.example.com/list\"\n").unwrap();

    let output = run_fwdlist(&["--config", path.to_str().unwrap(), "domains"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("HTTPS"), "stderr: {}", stderr);
}

#[test]
fn test_missing_config_exits_1() {
    let output = run_fwdlist(&["--config", "/nonexistent/fwdlist.yaml", "forward"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = run_fwdlist(&["blocklist"]);
    assert!(!output.status.success());
}
