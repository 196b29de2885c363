use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

fn smallsh() -> Command {
    let mut cmd = Command::cargo_bin("smallsh").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command, script: &str) -> String {
    let output = cmd.write_stdin(script).output().unwrap();
    assert!(output.status.success(), "shell failed: {:?}", output);
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn echo_then_status() {
    let out = stdout_of(&mut smallsh(), "echo hello\nstatus\nexit\n");
    assert_eq!(out, ": hello\n: exit value 0\n: ");
}

#[test]
fn comments_and_blank_lines() {
    let out = stdout_of(&mut smallsh(), "# a comment &\n\nstatus\n");
    assert_eq!(out, ": : : exit value 0\n: ");
}

#[test]
fn end_of_input_exits_cleanly() {
    smallsh().write_stdin("").assert().success().stdout(": ");
}

#[test]
fn background_job_notices() {
    let out = stdout_of(&mut smallsh(), "sleep 1 &\nexit\n");

    let pid: u32 = out
        .split("background pid is ")
        .nth(1)
        .and_then(|rest| rest.lines().next())
        .and_then(|pid| pid.trim().parse().ok())
        .expect("missing background pid notice");
    assert!(out.contains(&format!("background pid {} is done: exit value 0", pid)));
}

#[test]
fn cd_without_argument_goes_home() {
    let home = TempDir::new().unwrap();
    let start = TempDir::new().unwrap();
    let out_file = home.path().canonicalize().unwrap().join("pwd.txt");

    let mut cmd = smallsh();
    cmd.env("HOME", home.path()).current_dir(start.path());
    stdout_of(&mut cmd, &format!("cd\npwd > {}\nexit\n", out_file.display()));

    let pwd = fs::read_to_string(&out_file).unwrap();
    assert_eq!(
        fs::canonicalize(pwd.trim()).unwrap(),
        home.path().canonicalize().unwrap()
    );
}

#[test]
fn failed_cd_keeps_directory_and_reports_failure() {
    let start = TempDir::new().unwrap();
    let out_file = start.path().join("pwd.txt");

    let mut cmd = smallsh();
    cmd.current_dir(start.path());
    let out = stdout_of(
        &mut cmd,
        &format!("cd /nonexistent-path\nstatus\npwd > {}\n", out_file.display()),
    );

    assert!(out.contains("exit value 1"));
    let pwd = fs::read_to_string(&out_file).unwrap();
    assert_eq!(
        fs::canonicalize(pwd.trim()).unwrap(),
        start.path().canonicalize().unwrap()
    );
}

#[test]
fn pid_expansion_repeats_shell_pid() {
    let dir = TempDir::new().unwrap();
    let out_file = dir.path().join("pid.txt");
    stdout_of(&mut smallsh(), &format!("echo pid$$$$log > {}\n", out_file.display()));

    let text = fs::read_to_string(&out_file).unwrap();
    let inner = text.trim().strip_prefix("pid").unwrap().strip_suffix("log").unwrap();
    let (first, second) = inner.split_at(inner.len() / 2);
    assert_eq!(first, second);
    assert!(first.parse::<u32>().is_ok());
}

#[test]
fn redirection_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "banana\napple\ncherry\n").unwrap();

    stdout_of(
        &mut smallsh(),
        &format!("sort < {} > {}\n", input.display(), output.display()),
    );
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "apple\nbanana\ncherry\n"
    );
}

#[test]
fn missing_input_file_fails_only_the_child() {
    let out = stdout_of(&mut smallsh(), "cat < /nonexistent/file\nstatus\n");
    assert!(out.contains("exit value 1"));
}

#[test]
fn expansion_overflow_terminates_shell() {
    let script = format!("echo {}\nstatus\n", "$$".repeat(100));
    smallsh()
        .write_stdin(script)
        .assert()
        .failure()
        .stdout(": ");
}

#[test]
fn quiet_flag_and_script_file() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("cmds.txt");
    fs::write(&script, "status\nexit\n").unwrap();

    smallsh()
        .args(["-q", "-s"])
        .arg(&script)
        .assert()
        .success()
        .stdout("exit value 0\n");
}

#[test]
fn unknown_flag_is_rejected() {
    smallsh().arg("--bogus").assert().failure();
}
