mod options;
mod positional;
mod subcommands;

use cmdtree::{clitest::Capture, BoxError, Cli, Command, Program};
use expect_test::Expect;

/// Runs `root` as `test <args>` and snapshots the exit code and both streams.
fn check(root: Command, args: &str, expect: Expect) {
    check_with(Cli::new(root), args, expect)
}

fn check_with(cli: Cli, args: &str, expect: Expect) {
    let capture = Capture::new();
    let mut cli = cli
        .stdout(capture.stdout())
        .stderr(capture.stderr())
        .help_description("print help information");
    let code = cli.parse_and_run(std::iter::once("test").chain(args.split_ascii_whitespace()));
    let (out, err) = (capture.output(), capture.err_output());
    let actual = format!("exit: {code}\n--- stdout\n{out}--- stderr\n{err}");
    expect.assert_eq(&actual);
}

/// An action that prints everything it was given.
fn dump(prg: &mut dyn Program) -> Result<(), BoxError> {
    let matches = format!("{:#?}", prg.matches());
    writeln!(prg.stdout(), "{matches}")?;
    Ok(())
}
