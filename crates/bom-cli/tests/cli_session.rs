// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Drives the `bom` binary end to end over stdin and script files.

#![allow(missing_docs, clippy::unwrap_used)]
use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn bom() -> Command {
    let mut cmd = Command::cargo_bin("bom").unwrap();
    cmd.env_remove("RUST_LOG").arg("--no-config");
    cmd
}

const BICYCLE: &str = "\
addAssembly Bicycle=1:Frame;2:Wheel;1:Drivetrain;4:Bolt
addAssembly Wheel=1:Rim;1:Hub;32:Spoke
addAssembly Hub=1:Axle;2:Bearing;2:Bolt
addAssembly Drivetrain=1:Chain;2:Pedal;1:Crank
addAssembly Crank=2:Arm;2:Bolt
";

#[test]
fn car_session_over_stdin() {
    bom()
        .write_stdin(
            "addAssembly Car=4:Wheel;1:Engine\n\
             addAssembly Engine=2:Piston\n\
             getComponents Car\n\
             getAssemblies Car\n\
             printAssembly Car\n\
             quit\n",
        )
        .assert()
        .success()
        .stdout("OK\nOK\nWheel:4;Piston:2\nEngine:1\nEngine:1;Wheel:4\n")
        .stderr("");
}

#[test]
fn bicycle_totals_are_sorted() {
    let script = format!("{BICYCLE}getComponents Bicycle\ngetAssemblies Bicycle\n");
    bom()
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "Spoke:64;Bolt:10;Bearing:4;Arm:2;Axle:2;Pedal:2;Rim:2;Chain:1;Frame:1\n\
             Hub:2;Wheel:2;Crank:1;Drivetrain:1\n",
        ));
}

#[test]
fn errors_go_to_stderr_and_the_loop_continues() {
    bom()
        .write_stdin(
            "addAssembly A=1:B\n\
             addAssembly B=1:A\n\
             printAssembly B\n\
             addAssembly C=1:D;\n\
             getComponents Nope\n\
             quit\n\
             printAssembly A\n",
        )
        .assert()
        .success()
        .stdout("OK\nCOMPONENT\n")
        .stderr(
            predicate::str::contains("Error, changing B would create a cycle\n")
                .and(predicate::str::contains("Error, parameters can't end with ';'\n"))
                .and(predicate::str::contains("Error, part Nope does not exist\n"))
                .and(predicate::str::contains("printAssembly").not()),
        );
}

#[test]
fn script_file_with_echo() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("car.bom");
    fs::write(&script, "addAssembly Car=4:Wheel\nremovePart Car-4:Wheel\nprintAssembly Car\n").unwrap();
    bom()
        .arg("--echo")
        .arg("--script")
        .arg(&script)
        .assert()
        .success()
        .stdout(
            "> addAssembly Car=4:Wheel\nOK\n\
             > removePart Car-4:Wheel\nOK\n\
             > printAssembly Car\n",
        )
        .stderr(predicate::str::contains("Error, part Car does not exist"));
}

#[test]
fn missing_script_fails() {
    bom()
        .arg("--script")
        .arg("/definitely/not/here.bom")
        .assert()
        .failure()
        .stderr(predicate::str::contains("open script"));
}

#[test]
fn prefs_are_created_and_honoured() {
    let dir = tempfile::tempdir().unwrap();
    let run = |input: &str| {
        let mut cmd = Command::cargo_bin("bom").unwrap();
        cmd.env_remove("RUST_LOG")
            .arg("--config-dir")
            .arg(dir.path())
            .write_stdin(input.to_owned())
            .assert()
    };

    run("quit\n").success();
    let prefs_path = dir.path().join("cli.json");
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&prefs_path).unwrap()).unwrap();
    assert_eq!(written["error_prefix"], "Error, ");

    fs::write(&prefs_path, r#"{"error_prefix":"oops: ","echo_commands":true}"#).unwrap();
    run("printAssembly X\n")
        .success()
        .stdout("> printAssembly X\n")
        .stderr(predicate::str::contains("oops: part X does not exist"));
}
