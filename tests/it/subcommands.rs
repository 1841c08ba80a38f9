use cmdtree::{Arg, Cli, Command, Opt};
use expect_test::expect;

use crate::{check, check_with, dump};

fn foo() -> Command {
    Command::new().description("this is foo's description").action(|prg| {
        writeln!(prg.stdout(), "testing foo stdout")?;
        writeln!(prg.stderr(), "testing foo stderr")?;
        Err("foo has thrown an error".into())
    })
}

#[test]
fn unknown_subcommand() {
    let root = Command::new().action(dump).subcommand("foo", foo());
    check(
        root,
        "bar",
        expect![[r#"
            exit: 2
            --- stdout
            --- stderr
            test: command provided but not defined: bar
            USAGE:
                test [<OPTIONS>] [<COMMAND>]

            OPTIONS:
                -h, -help    print help information

            COMMANDS:
                foo    this is foo's description
        "#]],
    );
}

#[test]
fn parent_action_runs_without_subcommand() {
    let root = Command::new()
        .arg(Arg::string("IGNORED").required())
        .action(dump)
        .subcommand("foo", foo());
    check(
        root,
        "",
        expect![[r#"
            exit: 0
            --- stdout
            Matches {
                options: {},
                args: {},
            }
            --- stderr
        "#]],
    );
}

#[test]
fn action_error() {
    check(
        Command::new().subcommand("foo", foo()),
        "foo",
        expect![[r#"
            exit: 1
            --- stdout
            testing foo stdout
            --- stderr
            testing foo stderr
            test: foo has thrown an error
        "#]],
    );
}

#[test]
fn custom_misuse_code() {
    let root = Command::new().subcommand("foo", Command::new());
    check_with(
        Cli::new(root).misuse_code(2880154302),
        "bar",
        expect![[r#"
            exit: 2880154302
            --- stdout
            --- stderr
            test: command provided but not defined: bar
            USAGE:
                test [<OPTIONS>] <COMMAND>

            OPTIONS:
                -h, -help    print help information

            COMMANDS:
                foo
        "#]],
    );
}

#[test]
fn options_along_the_path() {
    let root = Command::new()
        .option("quiet", Opt::bool("Less output.").short('q'))
        .option("level", Opt::int("Nesting level.", 0))
        .subcommand(
            "hello",
            Command::new()
                .option("level", Opt::string("Shadows the parent.", "top"))
                .arg(Arg::string("NAME"))
                .action(dump),
        );
    check(
        root,
        "-q -level 3 hello -level deep you",
        expect![[r#"
            exit: 0
            --- stdout
            Matches {
                options: {
                    "level": "deep",
                    "quiet": true,
                },
                args: {
                    "NAME": "you",
                },
            }
            --- stderr
        "#]],
    );
}

#[test]
fn flags_after_subcommand_belong_to_it() {
    let root = Command::new()
        .option("quiet", Opt::bool("Less output."))
        .subcommand("hello", Command::new().action(dump));
    check(
        root,
        "hello -quiet",
        expect![[r#"
            exit: 2
            --- stdout
            --- stderr
            test: flag provided but not defined: -quiet
            USAGE:
                test hello [<OPTIONS>]

            OPTIONS:
                -h, -help    print help information
        "#]],
    );
}
