use cmdtree::{
    cliutil::{Appending, AppendingSet, CommaList, CommaSet},
    Command, Opt, Value,
};
use expect_test::expect;

use crate::{check, dump};

fn with_options() -> Command {
    Command::new()
        .option("string", Opt::string("pass a string here", "bar").short('s').label("TEXT"))
        .option("bool", Opt::bool("pass a boolean here").short('b').label("TRUE|FALSE"))
        .option("int", Opt::int("pass an integer here", 0).short('i').label("NUMBER"))
        .option(
            "int64",
            Opt::int64("pass a 64-bit integer here", 0).short('I').label("64-BIT NUMBER"),
        )
        .option("dull", Opt::string("just a dull option", ""))
        .action(dump)
}

#[test]
fn help_lists_options_alphabetically() {
    check(
        with_options(),
        "-h",
        expect![[r#"
            exit: 0
            --- stdout
            USAGE:
                test [<OPTIONS>]

            OPTIONS:
                -b, -bool <TRUE|FALSE>        pass a boolean here
                    -dull                     just a dull option
                -h, -help                     print help information
                -i, -int <NUMBER>             pass an integer here
                -I, -int64 <64-BIT NUMBER>    pass a 64-bit integer here
                -s, -string <TEXT>            pass a string here (default: "bar")
            --- stderr
        "#]],
    );
}

#[test]
fn short_aliases() {
    check(
        with_options(),
        "-s foo -b -i 0xDEADC0DE -I 0xABADBABE",
        expect![[r#"
            exit: 0
            --- stdout
            Matches {
                options: {
                    "bool": true,
                    "dull": "",
                    "int": 3735929054,
                    "int64": 2880289470,
                    "string": "foo",
                },
                args: {},
            }
            --- stderr
        "#]],
    );
}

#[test]
fn defaults() {
    check(
        with_options(),
        "",
        expect![[r#"
            exit: 0
            --- stdout
            Matches {
                options: {
                    "bool": false,
                    "dull": "",
                    "int": 0,
                    "int64": 0,
                    "string": "bar",
                },
                args: {},
            }
            --- stderr
        "#]],
    );
}

#[test]
fn long_forms() {
    check(
        with_options(),
        "--string=x=y -bool=false -int64 -5 --dull --",
        expect![[r#"
            exit: 0
            --- stdout
            Matches {
                options: {
                    "bool": false,
                    "dull": "--",
                    "int": 0,
                    "int64": -5,
                    "string": "x=y",
                },
                args: {},
            }
            --- stderr
        "#]],
    );
}

#[test]
fn flag_errors() {
    check(
        with_options(),
        "-x",
        expect![[r#"
            exit: 2
            --- stdout
            --- stderr
            test: flag provided but not defined: -x
            USAGE:
                test [<OPTIONS>]

            OPTIONS:
                -b, -bool <TRUE|FALSE>        pass a boolean here
                    -dull                     just a dull option
                -h, -help                     print help information
                -i, -int <NUMBER>             pass an integer here
                -I, -int64 <64-BIT NUMBER>    pass a 64-bit integer here
                -s, -string <TEXT>            pass a string here (default: "bar")
        "#]],
    );

    let root = || Command::new().option("n", Opt::int("a number", 1)).action(dump);
    check(
        root(),
        "-n",
        expect![[r#"
            exit: 2
            --- stdout
            --- stderr
            test: flag needs an argument: -n
            USAGE:
                test [<OPTIONS>]

            OPTIONS:
                -h, -help    print help information
                    -n       a number
        "#]],
    );
    check(
        root(),
        "-n lol",
        expect![[r#"
            exit: 2
            --- stdout
            --- stderr
            test: invalid value "lol" for flag -n: invalid digit found in string
            USAGE:
                test [<OPTIONS>]

            OPTIONS:
                -h, -help    print help information
                    -n       a number
        "#]],
    );
    check(
        root(),
        "-help=maybe",
        expect![[r#"
            exit: 2
            --- stdout
            --- stderr
            test: invalid boolean value "maybe" for -help: invalid syntax
            USAGE:
                test [<OPTIONS>]

            OPTIONS:
                -h, -help    print help information
                    -n       a number
        "#]],
    );
    check(
        root(),
        "---n",
        expect![[r#"
            exit: 2
            --- stdout
            --- stderr
            test: bad flag syntax: ---n
            USAGE:
                test [<OPTIONS>]

            OPTIONS:
                -h, -help    print help information
                    -n       a number
        "#]],
    );
}

#[test]
fn custom_values() {
    let root = Command::new()
        .option("tag", Opt::custom("tags, comma separated", CommaList::default()).short('t'))
        .option("set", Opt::custom("unique tags", CommaSet::default()))
        .option("line", Opt::custom("one line per use", Appending::default()))
        .option("host", Opt::custom("unique hosts", AppendingSet::default()))
        .action(|prg| {
            let m = prg.matches();
            let tags = m.get::<CommaList>("tag").map(|it| it.0.join("|"));
            let set = m.get::<CommaSet>("set").map(|it| it.0.len());
            let lines = m.get::<Appending>("line").map(|it| it.0.clone());
            let hosts = m.get::<AppendingSet>("host").map(|it| it.render());
            let report = format!("{tags:?} {set:?} {lines:?} {hosts:?}");
            writeln!(prg.stdout(), "{report}")?;
            Ok(())
        });
    check(
        root,
        "-t a,b -tag c -set x,y,x -line a,b -line c -host b,c -host a -host b,c",
        expect![[r#"
            exit: 0
            --- stdout
            Some("a|b|c") Some(2) Some(["a,b", "c"]) Some("[a b,c]")
            --- stderr
        "#]],
    );
}
