use cmdtree::{Arg, Cli, Command, Opt};

fn main() {
    env_logger::init();

    let root = Command::new()
        .description("Says hello.")
        .option("emoji", Opt::bool("End with a heart instead of a bang.").short('e'))
        .arg(Arg::string("NAME").required())
        .action(|prg| {
            let bang = if prg.matches().flag("emoji") { "❣️" } else { "!" };
            let name = prg.matches().arg("NAME").unwrap_or_default().to_string();
            writeln!(prg.stdout(), "Hello {name}{bang}")?;
            Ok(())
        });

    let code = Cli::new(root).run_from_env();
    std::process::exit(code as i32)
}
