//! Golden-file tests for the Go renderer
//!
//! Each `tests/fixtures/curl/<name>.sh` holds a curl command and
//! `tests/fixtures/go/<name>.go` the exact program it must convert to.

mod common;

use common::fixtures;
use curlgen::{convert, TargetStyle};

fn assert_golden(name: &str) {
    let command = fixtures::read(&format!("curl/{}.sh", name));
    let expected = fixtures::read(&format!("go/{}.go", name));

    let conversion = convert(&command, TargetStyle::Go)
        .unwrap_or_else(|e| panic!("{} failed to convert: {}", name, e));

    assert_eq!(
        conversion.source.source, expected,
        "generated Go for {} does not match the fixture",
        name
    );
}

#[test]
fn test_get_charles_syntax() {
    assert_golden("get_charles_syntax");
}

#[test]
fn test_get_with_env_var() {
    assert_golden("get_with_env_var");
}

#[test]
fn test_get_with_form() {
    assert_golden("get_with_form");
}

#[test]
fn test_patch_file_only() {
    assert_golden("j_patch_file_only");
}

#[test]
fn test_post_form_f() {
    assert_golden("j_post_form_f");
}

#[test]
fn test_multipart_post() {
    assert_golden("multipart_post");
}

#[test]
fn test_post_form() {
    assert_golden("post_form");
}

#[test]
fn test_post_image() {
    assert_golden("post_image");
}

#[test]
fn test_post_with_extra_whitespace() {
    assert_golden("post_with_extra_whitespace");
}

#[test]
fn test_charles_syntax_warns_about_compressed() {
    let command = fixtures::read("curl/get_charles_syntax.sh");
    let conversion = convert(&command, TargetStyle::Go).unwrap();
    assert!(!conversion.warnings.is_empty());
}

#[test]
fn test_env_var_is_deferred() {
    let command = fixtures::read("curl/get_with_env_var.sh");
    let conversion = convert(&command, TargetStyle::Go).unwrap();
    assert_eq!(conversion.request.env_refs.len(), 1);
    assert!(!conversion.source.source.contains("$DO_API_TOKEN"));
}
