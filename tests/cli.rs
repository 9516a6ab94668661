// relcfg - A declarative release configuration record.
// Copyright (C) 2026 The ERGS developers <ergsonomic@googlegroups.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3 of the License.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Integration tests for the `relcfg` command-line interface.

#![allow(clippy::pedantic, clippy::restriction)]

use std::process::Command;

use assert_cmd::prelude::*;
use assert_fs::{TempDir, prelude::*};
use eyre::Result;
use predicates::prelude::*;
use relcfg::config::{CONFIG_FILE_NAME, Config};

////////////////////////////////////////////////////////////////////////////////
//                                  Helpers                                   //
////////////////////////////////////////////////////////////////////////////////

fn setup_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

fn install_default_config(temp_dir: &TempDir) -> Result<()> {
    temp_dir
        .child(CONFIG_FILE_NAME)
        .write_str(&Config::default().to_toml())?;
    Ok(())
}

fn install_setup_py(temp_dir: &TempDir) -> Result<()> {
    temp_dir
        .child("setup.py")
        .write_str("#!/usr/bin/env python\nVERSION = '0.0.0'\n")?;
    Ok(())
}

fn relcfg(temp_dir: &TempDir) -> Result<Command> {
    // Prevent Git from finding a repository above the temporary directory, so
    // that it is used as the project root.
    let ceiling = temp_dir.path().parent().unwrap_or(temp_dir.path());

    let mut cmd = Command::cargo_bin("relcfg")?;
    cmd.current_dir(temp_dir.path())
        .env("GIT_CEILING_DIRECTORIES", ceiling)
        .env("NO_COLOR", "1")
        .env_remove("RELCFG_LOG");

    Ok(cmd)
}

////////////////////////////////////////////////////////////////////////////////
//                                    Init                                    //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn init_default_writes_the_default_config() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    relcfg(&temp_dir)?
        .args(["init", "--default"])
        .assert()
        .success()
        .stdout(predicate::str::contains("has been created"));

    let config = Config::load_from(temp_dir.child(CONFIG_FILE_NAME).path())?;
    assert_eq!(config, Config::default());

    Ok(())
}

#[test]
fn init_refuses_to_overwrite_an_existing_config() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    temp_dir.child(CONFIG_FILE_NAME).write_str("existing")?;

    relcfg(&temp_dir)?
        .args(["init", "--default"])
        .assert()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("relcfg init -f"));

    temp_dir.child(CONFIG_FILE_NAME).assert("existing");

    Ok(())
}

#[test]
fn init_force_overwrites_an_existing_config() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    temp_dir.child(CONFIG_FILE_NAME).write_str("existing")?;

    relcfg(&temp_dir)?
        .args(["init", "--default", "--force"])
        .assert()
        .success();

    let config = Config::load_from(temp_dir.child(CONFIG_FILE_NAME).path())?;
    assert_eq!(config, Config::default());

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
//                                    Show                                    //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn show_prints_the_config() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    install_default_config(&temp_dir)?;

    relcfg(&temp_dir)?
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"project = "fixie-batch""#))
        .stdout(predicate::str::contains("[[version_bump]]"));

    Ok(())
}

#[test]
fn show_is_deterministic() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    install_default_config(&temp_dir)?;

    let first = relcfg(&temp_dir)?.arg("show").output()?;
    let second = relcfg(&temp_dir)?.arg("show").output()?;

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    Ok(())
}

#[test]
fn show_without_config_suggests_init() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    relcfg(&temp_dir)?
        .arg("show")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("relcfg init"));

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
//                                   Check                                    //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn check_accepts_a_valid_config() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    install_default_config(&temp_dir)?;

    relcfg(&temp_dir)?
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));

    Ok(())
}

#[test]
fn check_rejects_an_invalid_config() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    let toml = Config::default()
        .to_toml()
        .replace("push tag", "tag release");
    temp_dir.child(CONFIG_FILE_NAME).write_str(&toml)?;

    relcfg(&temp_dir)?.arg("check").assert().failure();

    Ok(())
}

#[test]
fn check_files_reports_missing_files() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    install_default_config(&temp_dir)?;

    relcfg(&temp_dir)?
        .args(["check", "--files"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("setup.py"));

    Ok(())
}

#[test]
fn check_files_accepts_existing_files() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    install_default_config(&temp_dir)?;
    install_setup_py(&temp_dir)?;
    temp_dir.child("TEMPLATE.rst").touch()?;

    relcfg(&temp_dir)?
        .args(["check", "--files"])
        .assert()
        .success();

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
//                                    Bump                                    //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn bump_previews_without_writing() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    install_default_config(&temp_dir)?;
    install_setup_py(&temp_dir)?;

    relcfg(&temp_dir)?
        .args(["bump", "1.2.3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "setup.py:2: VERSION = '0.0.0' -> VERSION = '1.2.3'",
        ));

    temp_dir
        .child("setup.py")
        .assert("#!/usr/bin/env python\nVERSION = '0.0.0'\n");

    Ok(())
}

#[test]
fn bump_write_rewrites_the_versions() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    install_default_config(&temp_dir)?;
    install_setup_py(&temp_dir)?;

    relcfg(&temp_dir)?
        .args(["bump", "1.2.3", "--write"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 version declaration(s) updated"));

    temp_dir
        .child("setup.py")
        .assert("#!/usr/bin/env python\nVERSION = '1.2.3'\n");

    Ok(())
}

#[test]
fn bump_fails_on_missing_files() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    install_default_config(&temp_dir)?;

    relcfg(&temp_dir)?
        .args(["bump", "1.2.3", "--write"])
        .assert()
        .failure();

    Ok(())
}

#[test]
fn bump_rejects_empty_versions() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    install_default_config(&temp_dir)?;

    relcfg(&temp_dir)?.args(["bump", ""]).assert().code(2);

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
//                                 Source URL                                 //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn source_url_expands_the_template() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    install_default_config(&temp_dir)?;

    relcfg(&temp_dir)?
        .args(["source-url", "0.1.0"])
        .assert()
        .success()
        .stdout(
            "https://pypi.io/packages/source/f/fixie-batch/fixie-batch-0.1.0.tar.gz\n",
        );

    Ok(())
}
