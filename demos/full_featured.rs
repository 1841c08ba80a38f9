use cmdtree::{Arg, BoxError, Cli, Command, Opt, Program};

fn hello(prg: &mut dyn Program) -> Result<(), BoxError> {
    let m = prg.matches();
    let name = m.arg("NAME").unwrap_or("stranger");
    let greeting = if m.flag("upper") { name.to_uppercase() } else { name.to_string() };
    let quiet = m.flag("quiet");
    if !quiet {
        writeln!(prg.stderr(), "greeting someone")?;
    }
    writeln!(prg.stdout(), "Hello, {greeting}!")?;
    Ok(())
}

fn concat(prg: &mut dyn Program) -> Result<(), BoxError> {
    let m = prg.matches();
    let first = m.arg("FIRST WORD").unwrap_or_default();
    let last = m.arg("LAST WORD").unwrap_or_default();
    let joined = format!("{first}{last}");
    writeln!(prg.stdout(), "{joined}")?;
    Ok(())
}

fn join(prg: &mut dyn Program) -> Result<(), BoxError> {
    let m = prg.matches();
    let words = m.args("WORD");
    if words.is_empty() {
        return Err("nothing to join".into());
    }
    let joined = words.join(m.string("separator").unwrap_or(","));
    writeln!(prg.stdout(), "{joined}")?;
    Ok(())
}

fn main() {
    env_logger::init();

    let root = Command::new()
        .description("A program that shows what this crate can do.")
        .option("quiet", Opt::bool("Suppress progress messages.").short('q'))
        .subcommand(
            "hello",
            Command::new()
                .description("Greet someone.")
                .option("upper", Opt::bool("Shout the name."))
                .arg(Arg::string("NAME"))
                .action(hello),
        )
        .subcommand(
            "concat",
            Command::new()
                .description("Concatenate two words.")
                .arg(
                    Arg::string("FIRST WORD")
                        .required()
                        .then(Arg::string("LAST WORD").required()),
                )
                .action(concat),
        )
        .subcommand(
            "join",
            Command::new()
                .description("Join strings together.")
                .option(
                    "separator",
                    Opt::string("Separator between words.", ",").short('s').label("SEP"),
                )
                .arg(Arg::repeating("WORD").required())
                .action(join),
        );

    let code = Cli::new(root).name("my-cmd").run_from_env();
    std::process::exit(code as i32)
}
