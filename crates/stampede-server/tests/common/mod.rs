//! Shared helpers for integration tests that drive the real server
//! binary.

#![allow(dead_code)]

use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

/// Path to the compiled server binary under test.
pub fn server_exe() -> &'static str {
    env!("CARGO_BIN_EXE_stampede-server")
}

/// Spawns the server binary with the given CLI arguments and extra
/// environment variables.
///
/// Output is inherited so server logs land in the test output.
pub fn spawn_server(args: &[&str], envs: &[(&str, &str)]) -> Child {
    let mut command = Command::new(server_exe());
    command
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    for (key, value) in envs {
        command.env(key, value);
    }
    command.spawn().expect("failed to spawn stampede-server")
}

/// Reserves a free TCP port on the loopback interface.
///
/// The probe listener is dropped before returning, so another process
/// could in principle claim the port first. Good enough for tests.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr").port()
}

/// Blocks until `addr` accepts TCP connections or the timeout elapses.
pub fn wait_for_port(addr: &str, timeout: Duration) {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    panic!("server did not start listening on {addr}");
}

/// Polls `condition` every 50ms until it holds or the timeout elapses.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    false
}

/// Terminates `child` the way an operator would: SIGTERM first so a
/// supervisor gets to kill its workers, SIGKILL if it lingers.
#[cfg(unix)]
pub fn terminate(mut child: Child) {
    let pid = child.id().to_string();
    let _ = Command::new("kill").arg(&pid).status();

    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        match child.try_wait() {
            Ok(Some(_)) => return,
            _ => std::thread::sleep(Duration::from_millis(50)),
        }
    }

    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(not(unix))]
pub fn terminate(mut child: Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Lists the direct child PIDs of `pid`.
#[cfg(unix)]
pub fn child_pids(pid: u32) -> Vec<u32> {
    let output = Command::new("pgrep")
        .args(["-P", &pid.to_string()])
        .output()
        .expect("pgrep must run");
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter_map(|line| line.trim().parse().ok())
        .collect()
}

/// Returns whether a process with `pid` still exists.
#[cfg(unix)]
pub fn pid_alive(pid: u32) -> bool {
    Command::new("kill")
        .args(["-0", &pid.to_string()])
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Sends SIGKILL to `pid`.
#[cfg(unix)]
pub fn kill_pid(pid: u32) {
    let _ = Command::new("kill")
        .args(["-9", &pid.to_string()])
        .status();
}
