//! Mojo scanner CLI

use mojo_scan::{parse_args, read_source, render_state, render_tokens, CliError, Command, USAGE};

fn main() {
    mojo_scan::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprint!("{USAGE}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(command) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Help => print!("{USAGE}"),
        Command::Tokens(args) => {
            let source = read_source(&args.path)?;
            print!("{}", render_tokens(&source, args.json, args.resume)?);
        }
        Command::State { path } => {
            let source = read_source(&path)?;
            print!("{}", render_state(&source));
        }
    }
    Ok(())
}
