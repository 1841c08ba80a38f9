use cmdtree::{Arg, Command};
use expect_test::expect;

use crate::{check, dump};

#[test]
fn optional_arguments() {
    let root = || Command::new().arg(Arg::string("FOO").then(Arg::string("BAR"))).action(dump);
    check(
        root(),
        "foo bar",
        expect![[r#"
            exit: 0
            --- stdout
            Matches {
                options: {},
                args: {
                    "BAR": "bar",
                    "FOO": "foo",
                },
            }
            --- stderr
        "#]],
    );
    check(
        root(),
        "foo",
        expect![[r#"
            exit: 0
            --- stdout
            Matches {
                options: {},
                args: {
                    "FOO": "foo",
                },
            }
            --- stderr
        "#]],
    );
    check(
        root(),
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
fn missing_required_argument() {
    let root = || {
        Command::new().arg(Arg::string("FOO").required().then(Arg::string("BAR"))).action(dump)
    };
    check(
        root(),
        "",
        expect![[r#"
            exit: 2
            --- stdout
            --- stderr
            test: missing required argument: FOO
            USAGE:
                test [<OPTIONS>] <FOO> [<BAR>]

            OPTIONS:
                -h, -help    print help information
        "#]],
    );
    check(
        root(),
        "foo",
        expect![[r#"
            exit: 0
            --- stdout
            Matches {
                options: {},
                args: {
                    "FOO": "foo",
                },
            }
            --- stderr
        "#]],
    );
}

#[test]
fn second_required_argument() {
    let root = Command::new()
        .arg(Arg::string("FIRST WORD").required().then(Arg::string("LAST WORD").required()))
        .action(dump);
    check(
        root,
        "hello",
        expect![[r#"
            exit: 2
            --- stdout
            --- stderr
            test: missing required argument: LAST WORD
            USAGE:
                test [<OPTIONS>] <FIRST WORD> <LAST WORD>

            OPTIONS:
                -h, -help    print help information
        "#]],
    );
}

#[test]
fn optional_argument_hides_later_required_one() {
    let root = Command::new()
        .arg(Arg::string("FOO").then(Arg::string("BAR").required()))
        .action(dump);
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
fn repeating_argument() {
    let root = || Command::new().arg(Arg::repeating("FOO")).action(dump);
    check(
        root(),
        "foo bar",
        expect![[r#"
            exit: 0
            --- stdout
            Matches {
                options: {},
                args: {
                    "FOO": [
                        "foo",
                        "bar",
                    ],
                },
            }
            --- stderr
        "#]],
    );
    check(
        root(),
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
fn required_repeating_argument_accepts_nothing() {
    let root = Command::new()
        .arg(Arg::string("SEP").required().then(Arg::repeating("WORD").required()))
        .action(dump);
    check(
        root,
        ",",
        expect![[r#"
            exit: 0
            --- stdout
            Matches {
                options: {},
                args: {
                    "SEP": ",",
                },
            }
            --- stderr
        "#]],
    );
}

#[test]
fn extra_tokens_are_ignored() {
    check(
        Command::new().arg(Arg::string("FOO")).action(dump),
        "a b c",
        expect![[r#"
            exit: 0
            --- stdout
            Matches {
                options: {},
                args: {
                    "FOO": "a",
                },
            }
            --- stderr
        "#]],
    );
}

#[test]
fn typed_argument() {
    let root =
        || Command::new().arg(Arg::typed("COUNT", 0i64).then(Arg::string("NAME"))).action(dump);
    check(
        root(),
        "0x10 bob",
        expect![[r#"
            exit: 0
            --- stdout
            Matches {
                options: {},
                args: {
                    "COUNT": 16,
                    "NAME": "bob",
                },
            }
            --- stderr
        "#]],
    );
    check(
        root(),
        "many bob",
        expect![[r#"
            exit: 2
            --- stdout
            --- stderr
            test: bad argument parsing: invalid value "many" for argument COUNT: invalid digit found in string
            USAGE:
                test [<OPTIONS>] [<COUNT> [<NAME>]]

            OPTIONS:
                -h, -help    print help information
        "#]],
    );
}
