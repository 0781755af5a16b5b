use assert_cmd::Command;

/// Points the session at a port nothing listens on so it runs off the seed.
fn plume() -> Command {
    let mut cmd = Command::cargo_bin("plume").unwrap();
    cmd.env("PLUME_ENV", "local")
        .env("PLUME_CONFIG_DIR", "/nonexistent")
        .env("PLUME_API_URL", "http://127.0.0.1:9/api")
        .env("RUST_LOG", "off");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn help_lists_commands() {
    let out = stdout_of(plume().arg("--help"));
    for command in ["serve", "home", "read", "bundles", "buy"] {
        assert!(out.contains(command), "missing {command} in:\n{out}");
    }
}

#[test]
fn buying_the_popular_bundle_credits_bonus() {
    let out = stdout_of(plume().args(["buy", "--bundle", "2", "--method", "mtn"]));
    assert!(out.contains("received 600 coins for 800 F CFA via MTN Mobile Money"));
    assert!(out.contains("balance: 650 coins"));
}

#[test]
fn reading_a_locked_chapter_spends_coins() {
    let out = stdout_of(plume().args(["read", "b-1", "b-1-c4"]));
    assert!(out.contains("unlocked for 5 coins, 45 left"));
    assert!(out.contains("Les Ombres d'Abidjan"));
}

#[test]
fn unknown_bundle_fails() {
    plume().args(["buy", "--bundle", "9"]).assert().failure();
}
