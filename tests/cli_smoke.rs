use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn prio_help_works() {
    Command::cargo_bin("prio")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("priority-bucketed task list"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = [
        "add", "list", "show", "edit", "toggle", "rm", "theme", "board",
    ];

    for cmd in subcommands {
        Command::cargo_bin("prio")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}
