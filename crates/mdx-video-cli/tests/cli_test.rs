//! Binary-level tests for the mdx-video command

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn mdx_video() -> Command {
    cargo_bin_cmd!("mdx-video")
}

#[test]
fn test_stdin_to_stdout() {
    mdx_video()
        .write_stdin("http://www.vimeo.com/1496152\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"src="https://player.vimeo.com/video/1496152""#,
        ))
        .stdout(predicate::str::contains(r#"width="500""#));
}

#[test]
fn test_file_to_file_with_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.md");
    let output = dir.path().join("out.html");
    std::fs::write(&input, "# Clips\n\nhttp://youtu.be/abc123\n").unwrap();

    mdx_video()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["-x", "video(youtube_width=200,youtube_height=100)"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<h1>Clips</h1>\n"));
    assert!(html.contains(r#"<iframe width="200" height="100" src="http://www.youtube.com/v/abc123""#));
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("video.toml");
    std::fs::write(&config, "[video]\nmetacafe_width = 500\nmetacafe_height = \"425\"\n").unwrap();

    mdx_video()
        .arg("-C")
        .arg(&config)
        .write_stdin("http://www.metacafe.com/watch/11419683/killing_luke_skywalker_battlefront/")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"width="500" height="425""#));
}

#[test]
fn test_unknown_option_fails_setup() {
    mdx_video()
        .args(["--set", "vine_width=1"])
        .write_stdin("http://www.vimeo.com/1496152")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown option `vine_width`"));
}

#[test]
fn test_list_options() {
    mdx_video()
        .args(["--list-options", "-s", "vimeo_width=640"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dailymotion_width"))
        .stdout(predicate::str::is_match(r"vimeo_width\s+640\s+Width for Vimeo videos").unwrap());
}
