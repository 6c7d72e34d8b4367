use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use std::process::ExitCode;
use subprocess::{Exec, ExitStatus};

use create_frontend::{
    args::Args,
    catalog,
    command::CustomCommand,
    config::Environment,
    error, info,
    materialize::{self, Outcome},
    prompt::{self, InquirePrompter},
    trace, warn, ScaffoldError,
};

fn run_custom(cmd: &CustomCommand, env: &Environment) -> Result<ExitCode> {
    info!("Running {cmd}");

    let status = Exec::cmd(&cmd.program)
        .args(cmd.args.as_slice())
        .cwd(env.cwd())
        .join()
        .with_context(|| format!("Failed to run `{cmd}`"))?;

    if !status.success() {
        warn!("`{cmd}` finished with {status:?}");
    }

    Ok(match status {
        ExitStatus::Exited(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        _ => ExitCode::FAILURE,
    })
}

fn app(args: &Args) -> Result<ExitCode> {
    trace!("Arguments: {args:?}");

    let env = Environment::detect(args.templates_dir.as_deref())?;
    let answers = prompt::run_flow(&args.preset(), env.cwd(), &mut InquirePrompter)?;

    if catalog::lookup_custom_command(&answers.target.template).is_none() {
        println!(
            "\nScaffolding project in {}...",
            answers.reconciliation.root().display()
        );
    }

    let prepared = answers.reconciliation.apply()?;

    match materialize::materialize(&answers.target, &prepared, &env)? {
        Outcome::Delegated(cmd) if args.no_exec => {
            println!("{cmd}");
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Delegated(cmd) => run_custom(&cmd, &env),
        Outcome::Copied { root, files } => {
            trace!("Copied {} files", files.len());

            println!("\nDone. Now run:\n");
            for step in materialize::next_steps(&root, env.cwd(), env.package_manager()) {
                println!("  {step}");
            }
            println!();

            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match app(&args) {
        Ok(code) => code,
        Err(e) if ScaffoldError::is_cancelled(&e) => {
            eprintln!(
                "{} Operation cancelled",
                "✖".if_supports_color(owo_colors::Stream::Stderr, |s| s.red())
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            if !args.no_errors() {
                error!("{e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
