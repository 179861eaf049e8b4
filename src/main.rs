//! # mind
//!
//! Command line driver: boots the machine, runs the bootstrap file, an
//! optional command, then the interactive console.

use anyhow::{bail, Context};
use clap::Parser;
use mind::lang::{FileStream, TextStream};
use mind::mach::{Config, Event, Runtime};
use mind::term::{interrupt_flag, Console};
use std::path::PathBuf;
use std::process::exit;

/// A small self-extending Forth interpreter
#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Execute COMMAND, then stop
    #[arg(short = 'e', value_name = "COMMAND", conflicts_with = "interact")]
    execute: Option<String>,

    /// Execute COMMAND, then start the command prompt
    #[arg(short = 'x', value_name = "COMMAND")]
    interact: Option<String>,

    /// Arguments for the program, available as `argc` and `argv`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn boot_path() -> anyhow::Result<PathBuf> {
    if let Some(path) = std::env::var_os("MIND_BOOT") {
        return Ok(PathBuf::from(path));
    }
    let exe = std::env::current_exe().context("cannot locate the executable")?;
    let dir = exe.parent().context("executable has no directory")?;
    Ok(dir.join("boot.mind"))
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) if !error.use_stderr() => {
            let _ = error.print();
            exit(0);
        }
        Err(error) => {
            let _ = error.print();
            exit(-1);
        }
    };
    let interactive = args.execute.is_none();
    let command = args.execute.or(args.interact);

    let config = Config {
        checked: std::env::var_os("MIND_UNCHECKED").is_none(),
        styled: interactive,
        ..Config::default()
    };
    log::debug!("{:?}", config);
    let mut runtime = Runtime::new(config).context("cannot boot the machine")?;
    runtime.set_args(&args.args)?;
    if interactive {
        runtime.set_abort_hook("quit")?;
        runtime.set_interrupt(interrupt_flag().context("cannot set Ctrl-C handler")?);
    }

    let path = boot_path()?;
    let boot = FileStream::open(&path);
    if !boot.is_open() {
        bail!("cannot open bootstrap file {}", path.display());
    }
    log::debug!("bootstrap {}", path.display());
    if runtime.evaluate(Box::new(boot)) == Event::Bye {
        return Ok(());
    }

    if let Some(command) = command {
        if runtime.evaluate(Box::new(TextStream::new(&command))) == Event::Bye {
            return Ok(());
        }
    }

    if interactive {
        let console = Console::new().context("cannot open the console")?;
        runtime.evaluate(Box::new(console.stream()));
    }
    Ok(())
}
