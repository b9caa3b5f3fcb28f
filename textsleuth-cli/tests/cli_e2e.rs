use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::{tempdir, TempDir};

/// Helper for driving the binary with arguments, optional stdin, and
/// scratch files.
struct CliTestEnv {
    dir: TempDir,
    bin: &'static str,
}

impl CliTestEnv {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
            bin: env!("CARGO_BIN_EXE_textsleuth-cli"),
        }
    }

    fn run(&self, args: &[&str], input: Option<&str>) -> (bool, String, String) {
        use std::io::Write;
        use std::process::Stdio;

        let mut child = Command::new(self.bin)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn process");

        if let Some(stdin_content) = input {
            let mut stdin = child.stdin.take().expect("failed to open stdin");
            stdin
                .write_all(stdin_content.as_bytes())
                .expect("failed to write to stdin");
        }

        let output = child.wait_with_output().expect("failed to wait on child");
        (
            output.status.success(),
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
        )
    }

    fn run_expect_success(&self, args: &[&str], input: Option<&str>) -> String {
        let (success, stdout, stderr) = self.run(args, input);
        assert!(
            success,
            "Command failed: textsleuth {}\nSTDOUT: {}\nSTDERR: {}",
            args.join(" "),
            stdout,
            stderr
        );
        stdout
    }

    fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_cli_help_and_version() {
    let env = CliTestEnv::new();

    let stdout = env.run_expect_success(&["--help"], None);
    assert!(stdout.contains("Text forensics"), "unexpected help: {stdout}");
    for subcommand in ["decode", "hidden", "anomalies", "plagiarism", "authorship", "encode"] {
        assert!(stdout.contains(subcommand), "help missing {subcommand}");
    }

    let stdout = env.run_expect_success(&["--version"], None);
    assert!(stdout.contains("textsleuth-cli"));
}

#[test]
fn test_decode_caesar_report() {
    let env = CliTestEnv::new();

    // "hej var god stanna" shifted by 3.
    let stdout = env.run_expect_success(
        &["decode", "khm ydu jrg vwdqqd", "--kind", "caesar"],
        None,
    );
    assert!(stdout.contains("CIPHER ANALYSIS"));
    assert!(stdout.contains("shift-23"));
    assert!(stdout.contains("hej var god stanna"));
}

#[test]
fn test_encode_decode_round_trip() {
    let env = CliTestEnv::new();

    let encoded = env.run_expect_success(&["encode", "hej var god stanna", "--shift", "7"], None);
    let stdout = env.run_expect_success(&["decode", encoded.trim(), "--kind", "caesar"], None);
    assert!(stdout.contains("Best candidate: shift-19"));
    assert!(stdout.contains("hej var god stanna"));
}

#[test]
fn test_encode_rejects_out_of_range_shift() {
    let env = CliTestEnv::new();
    let (success, _stdout, stderr) = env.run(&["encode", "abc", "--shift", "26"], None);
    assert!(!success);
    assert!(stderr.contains("1..=25"), "unexpected stderr: {stderr}");
}

#[test]
fn test_decode_reads_stdin_when_no_text_given() {
    let env = CliTestEnv::new();
    let stdout = env.run_expect_success(
        &["decode", "--kind", "base64"],
        Some("ZW4gaGVtbGlnIHRleHQ="),
    );
    assert!(stdout.contains("en hemlig text"));
}

#[test]
fn test_decode_json_envelope() {
    let env = CliTestEnv::new();
    let stdout = env.run_expect_success(
        &["--json", "decode", "khm ydu jrg vwdqqd", "--kind", "caesar"],
        None,
    );

    let envelope: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(envelope["success"], true);
    assert!(envelope["timestamp"].is_string());
    assert_eq!(envelope["data"]["candidates"].as_array().unwrap().len(), 25);
    assert_eq!(envelope["data"]["best"]["decoded"], "hej var god stanna");
}

#[test]
fn test_decode_unknown_kind_fails() {
    let env = CliTestEnv::new();
    let (success, _stdout, stderr) = env.run(&["decode", "abc", "--kind", "vigenere"], None);
    assert!(!success);
    assert!(stderr.contains("unsupported cipher kind"), "unexpected stderr: {stderr}");
}

#[test]
fn test_empty_input_fails_in_report_mode_but_not_json_mode() {
    let env = CliTestEnv::new();

    let (success, _stdout, stderr) = env.run(&["hidden"], Some("   "));
    assert!(!success);
    assert!(stderr.contains("analysis failed"), "unexpected stderr: {stderr}");

    // JSON mode always emits the envelope; the failure lives inside it.
    let stdout = env.run_expect_success(&["--json", "hidden"], Some("   "));
    let envelope: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(envelope["success"], false);
    assert!(envelope["error"].as_str().unwrap().contains("empty"));
}

#[test]
fn test_hidden_message_scan_finds_sentence_acronym() {
    let env = CliTestEnv::new();
    let stdout = env.run_expect_success(
        &["hidden", "Alla barn gillar glass. Nu kommer sommaren. Katten springer snabbt."],
        None,
    );
    assert!(stdout.contains("HIDDEN MESSAGE SCAN"));
    assert!(stdout.contains("acronym-sentences"));
    assert!(stdout.contains("ANK"));
}

#[test]
fn test_anomaly_scan_from_file() {
    let env = CliTestEnv::new();
    let path = env.write_file("suspect.txt", "synlig text\u{200B}med gömda\u{200B}tecken");

    let stdout = env.run_expect_success(&["anomalies", "--file", path.to_str().unwrap()], None);
    assert!(stdout.contains("STEGANOGRAPHY ANOMALY SCAN"));
    assert!(stdout.contains("control or invisible"));
    assert!(stdout.contains("RECOMMENDATIONS"));
}

#[test]
fn test_anomaly_scan_clean_text() {
    let env = CliTestEnv::new();
    let stdout = env.run_expect_success(
        &["anomalies", "Det var en helt vanlig dag och alla barn lekte ute i solen."],
        None,
    );
    assert!(stdout.contains("Suspicion:      NONE"));
    assert!(stdout.contains("No anomalies detected."));
}

#[test]
fn test_plagiarism_identical_files() {
    let env = CliTestEnv::new();
    let text = "Forskaren skrev rapporten under våren. Resultaten visade en tydlig trend över tid.";
    let original = env.write_file("original.txt", text);
    let suspect = env.write_file("suspect.txt", text);

    let stdout = env.run_expect_success(
        &[
            "plagiarism",
            original.to_str().unwrap(),
            suspect.to_str().unwrap(),
        ],
        None,
    );
    assert!(stdout.contains("PLAGIARISM CHECK"));
    assert!(stdout.contains("100.00%"));
    assert!(stdout.contains("PLAGIARISM SUSPECTED"));
    assert!(stdout.contains("CRITICAL"));
}

#[test]
fn test_plagiarism_threshold_flag() {
    let env = CliTestEnv::new();
    let original = env.write_file(
        "original.txt",
        "Hösten kom tidigt i år och löven föll redan i september.",
    );
    let suspect = env.write_file(
        "suspect.txt",
        "Hösten kom tidigt i år och löven föll först i oktober.",
    );

    let stdout = env.run_expect_success(
        &[
            "plagiarism",
            original.to_str().unwrap(),
            suspect.to_str().unwrap(),
            "--threshold",
            "0.1",
        ],
        None,
    );
    assert!(stdout.contains("PLAGIARISM SUSPECTED"));
}

#[test]
fn test_plagiarism_missing_file_fails() {
    let env = CliTestEnv::new();
    let original = env.write_file("original.txt", "en lång text som finns på riktigt här");

    let (success, _stdout, stderr) = env.run(
        &[
            "plagiarism",
            original.to_str().unwrap(),
            "/nonexistent/suspect.txt",
        ],
        None,
    );
    assert!(!success);
    assert!(stderr.contains("failed to read"), "unexpected stderr: {stderr}");
}

#[test]
fn test_authorship_report() {
    let env = CliTestEnv::new();
    let first = env.write_file("first.txt", "Jag tycker det är en fin dag ute idag.");
    let second = env.write_file("second.txt", "Jag tycker det är en trevlig dag ute idag.");

    let stdout = env.run_expect_success(
        &["authorship", first.to_str().unwrap(), second.to_str().unwrap()],
        None,
    );
    assert!(stdout.contains("AUTHORSHIP ANALYSIS"));
    assert!(stdout.contains("Likely the same author"));
    assert!(stdout.contains("STYLE COMPONENTS"));
    assert!(stdout.contains("TEXT METRICS"));
}
