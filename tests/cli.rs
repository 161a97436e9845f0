use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const PEP_1: &str = "\
PEP: 1
Title: Foo
Author: A
Status: Active
Created: 01-Jan-2020

Abstract
========

Hello.

Second paragraph.
";

const PEP_2: &str = "\
PEP: 2
Title: Bar
Author: B
Created: 02-Feb-2021

Motivation
==========

No abstract here.
";

fn fixture() -> Result<tempfile::TempDir, Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("pep-0001.rst"), PEP_1)?;
    fs::write(dir.path().join("pep-0002.rst"), PEP_2)?;
    Ok(dir)
}

#[test]
fn writes_feed_from_current_directory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = fixture()?;
    let mut cmd = Command::cargo_bin("pep2rss")?;
    cmd.env("NO_COLOR", "1").current_dir(dir.path()).arg(".");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("✓ 2").and(predicate::str::contains("✗ 0")));

    let xml = fs::read_to_string(dir.path().join("peps.rss"))?;
    let two = xml.find("<title>PEP 2: Bar</title>").ok_or("PEP 2 missing")?;
    let one = xml.find("<title>PEP 1: Foo</title>").ok_or("PEP 1 missing")?;
    assert!(two < one, "newest entry must come first:\n{xml}");
    assert!(xml.contains("<link>https://www.python.org/dev/peps/pep-0001/</link>"));
    assert!(xml.contains("<description>Hello.</description>"));
    assert!(!xml.contains("Second paragraph"));
    assert_eq!(xml.matches("<description>").count(), 2, "channel + PEP 1 only:\n{xml}");
    Ok(())
}

#[test]
fn source_flag_scans_another_directory() -> Result<(), Box<dyn std::error::Error>> {
    let input = fixture()?;
    let output = tempfile::tempdir()?;
    let mut cmd = Command::cargo_bin("pep2rss")?;
    cmd.env("NO_COLOR", "1")
        .arg("--source")
        .arg(input.path())
        .arg(output.path());
    cmd.assert().success();

    assert!(output.path().join("peps.rss").is_file());
    assert!(!input.path().join("peps.rss").exists());
    Ok(())
}

#[test]
fn empty_directory_still_writes_a_channel() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut cmd = Command::cargo_bin("pep2rss")?;
    cmd.env("NO_COLOR", "1").current_dir(dir.path()).arg(".");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("✓ 0"));
    let xml = fs::read_to_string(dir.path().join("peps.rss"))?;
    assert!(xml.contains("<title>Newest Python PEPs</title>"));
    assert!(!xml.contains("<item>"));
    Ok(())
}

#[test]
fn bogus_month_fails_the_run() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(
        dir.path().join("pep-0009.txt"),
        "Title: Broken\nCreated: 01-Smarch-2020\n",
    )?;
    let mut cmd = Command::cargo_bin("pep2rss")?;
    cmd.env("NO_COLOR", "1").current_dir(dir.path()).arg(".");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unparseable creation date"));
    assert!(!dir.path().join("peps.rss").exists());
    Ok(())
}

#[test]
fn missing_output_directory_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("pep2rss")?;
    cmd.arg("/definitely/not/here");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
    Ok(())
}
