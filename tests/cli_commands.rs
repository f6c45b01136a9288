// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod common;

use assert_cmd::Command;
use common::fixtures::{create_index, location_href};
use driverkit::repo::Compression;
use mockito::Server;
use predicates::prelude::*;
use tempfile::TempDir;

fn driverkit(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("driverkit").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("DRIVERKIT_MIRRORS__AMAZONLINUX")
        .env_remove("DRIVERKIT_MIRRORS__AMAZONLINUX2")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    driverkit(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("script")
                .and(predicate::str::contains("resolve"))
                .and(predicate::str::contains("targets")),
        );
}

#[test]
fn test_targets_lists_both_distributions() {
    let home = TempDir::new().unwrap();
    driverkit(&home)
        .arg("targets")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("amazonlinux (bzip2)")
                .and(predicate::str::contains("amazonlinux2 (gzip)"))
                .and(predicate::str::contains("2017.03")),
        );
}

#[test]
fn test_unsupported_target_exit_code() {
    let home = TempDir::new().unwrap();
    driverkit(&home)
        .args(["resolve", "-t", "ubuntu", "-k", "5.10.0-1.el2.x86_64"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ubuntu"));
}

#[test]
fn test_invalid_kernel_release_exit_code() {
    let home = TempDir::new().unwrap();
    driverkit(&home)
        .args(["resolve", "-t", "amazonlinux2", "-k", "not-a-kernel"])
        .assert()
        .code(2);
}

#[test]
fn test_zero_timeout_rejected_like_config() {
    let home = TempDir::new().unwrap();
    driverkit(&home)
        .args([
            "resolve",
            "-t",
            "amazonlinux2",
            "-k",
            "5.10.0-1.el2.x86_64",
            "--timeout",
            "0",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--timeout"));
}

#[test]
fn test_missing_config_file_fails() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("missing.toml");
    driverkit(&home)
        .arg("--config")
        .arg(&missing)
        .arg("targets")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.toml"));
}

#[test]
fn test_resolve_json_against_mirror() {
    let mut server = Server::new();
    let _mirrors = common::mock_mirror_lists(&mut server);
    let _index = server
        .mock("GET", "/repo/repodata/primary.sqlite.gz")
        .with_status(200)
        .with_body(create_index(
            &[
                ("kernel", "5.10.0", "1.el2"),
                ("kernel-devel", "5.10.0", "1.el2"),
            ],
            Compression::Gzip,
        ))
        .create();

    let home = TempDir::new().unwrap();
    let config = common::write_config(&home, &server.url());
    let kernel = format!("{}/repo/{}", server.url(), location_href("kernel", "5.10.0", "1.el2"));

    driverkit(&home)
        .arg("--config")
        .arg(&config)
        .args(["resolve", "-t", "amazonlinux2", "-k", "5.10.0-1.el2.x86_64", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("\"{kernel}\"")));
}

#[test]
fn test_script_written_to_file() {
    let mut server = Server::new();
    let _mirrors = common::mock_mirror_lists(&mut server);
    let _index = server
        .mock("GET", "/repo/repodata/primary.sqlite.gz")
        .with_status(200)
        .with_body(create_index(
            &[
                ("kernel", "5.10.0", "1.el2"),
                ("kernel-devel", "5.10.0", "1.el2"),
            ],
            Compression::Gzip,
        ))
        .create();

    let home = TempDir::new().unwrap();
    let config = common::write_config(&home, &server.url());
    let output = home.path().join("out").join("build.sh");

    driverkit(&home)
        .arg("--config")
        .arg(&config)
        .args([
            "script",
            "-t",
            "amazonlinux2",
            "-k",
            "5.10.0-1.el2.x86_64",
            "--driver-version",
            "0.26.4",
            "--probe-file",
            "/out/probe.o",
            "--output",
        ])
        .arg(&output)
        .assert()
        .success();

    let script = std::fs::read_to_string(&output).unwrap();
    assert!(script.contains("0.26.4.tar.gz"));
    assert!(script.contains("building eBPF probe"));
    assert!(script.contains(&location_href("kernel-devel", "5.10.0", "1.el2")));
}

#[test]
fn test_package_count_mismatch_exit_code() {
    let mut server = Server::new();
    let _mirrors = common::mock_mirror_lists(&mut server);
    let _index = server
        .mock("GET", "/repo/repodata/primary.sqlite.gz")
        .with_status(200)
        .with_body(create_index(&[("kernel-devel", "5.10.0", "1.el2")], Compression::Gzip))
        .create();

    let home = TempDir::new().unwrap();
    let config = common::write_config(&home, &server.url());

    driverkit(&home)
        .arg("--config")
        .arg(&config)
        .args(["resolve", "-t", "amazonlinux2", "-k", "5.10.0-1.el2.x86_64"])
        .assert()
        .code(4);
}
