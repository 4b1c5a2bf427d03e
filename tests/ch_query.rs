use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

const GRAPH: &str = "4 4\n1 2 1\n2 3 1\n1 3 5\n3 4 1\n";

fn run_ch_query(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ch_query"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn ch_query");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    child.wait_with_output().expect("failed to wait for ch_query")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "ch_query failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn one_based_ids_and_unreachable() {
    let input = format!("{}3\n1 4\n4 1\n2 2\n", GRAPH);
    let output = run_ch_query(&["--verify"], &input);

    assert_eq!(stdout(&output), "3\n-1\n0\n");
}

#[test]
fn zero_based_ids() {
    let input = "3 2\n0 1 4\n1 2 6\n2\n0 2\n2 0\n";
    let output = run_ch_query(&["--zero-based"], input);

    assert_eq!(stdout(&output), "10\n-1\n");
}

#[test]
fn saved_graph_answers_queries_only_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.bincode");
    let path = path.to_str().unwrap();

    let input = format!("{}1\n1 3\n", GRAPH);
    let output = run_ch_query(&["--save", path], &input);
    assert_eq!(stdout(&output), "2\n");

    let output = run_ch_query(&["--load", path], "2\n1 4\n3 1\n");
    assert_eq!(stdout(&output), "3\n-1\n");
}

#[test]
fn malformed_input_names_the_line() {
    let output = run_ch_query(&[], "3 2\n1 2 1\n2 3 x\n1\n1 3\n");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 3"), "{}", stderr);
    assert!(stderr.contains("edge weight"), "{}", stderr);
}

#[test]
fn zero_id_is_rejected_with_its_line() {
    let output = run_ch_query(&[], &format!("{}1\n0 2\n", GRAPH));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 7"), "{}", stderr);
}

#[test]
fn truncated_input_is_an_error() {
    let output = run_ch_query(&[], "3 2\n1 2 1\n");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unexpected end of input after line 2"), "{}", stderr);
}
