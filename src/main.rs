use auditfix::cli::{Cli, Command};
use auditfix::{cmd_audit, cmd_fix, cmd_init};
use clap::Parser;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Command::Audit(args) => cmd_audit(args),
        Command::Fix(args) => cmd_fix(args),
        Command::Init(args) => cmd_init(args),
    };

    std::process::exit(exit_code);
}
