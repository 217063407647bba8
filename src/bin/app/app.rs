use log::info;
use clap::{Parser, Subcommand};

use super::cmd::{batch, info, simplify};
use super::utils::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Cmd
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Simplify a diagram and print the resulting pieces.
    Simplify(simplify::Args),
    /// Print invariants and codes of a diagram.
    Info(info::Args),
    /// Simplify every diagram listed in a file and write a CSV report.
    Batch(batch::Args),
}

impl CliArgs { 
    fn log_level(&self) -> log::LevelFilter { 
        use log::LevelFilter::*;
        let level = match &self.command { 
            Cmd::Simplify(args) => args.log,
            Cmd::Info(args)     => args.log,
            Cmd::Batch(args)    => args.log,
        };
        match level {
            1 => Info,
            2 => Debug,
            3 => Trace,
            _ => Off,
        }
    }
}

pub struct App {
    pub args: CliArgs
}

impl App { 
    pub fn new() -> Self { 
        let args = CliArgs::parse();
        App { args }
    }

    pub fn run(&self) -> Result<String, Box<dyn std::error::Error>> { 
        self.init_logger();

        info!("args: {:?}", self.args);

        let (res, time) = measure(||
            self.dispatch()
        );

        info!("time: {:?}", time);

        res
    }

    fn init_logger(&self) {
        use simplelog::*;
        if let Err(e) = TermLogger::init(
            self.args.log_level(),
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto
        ) { 
            eprintln!("cannot initialize logger: {e}");
        }
    }

    fn dispatch(&self) -> Result<String, Box<dyn std::error::Error>> { 
        guard_panic(||
            match &self.args.command { 
                Cmd::Simplify(args) => simplify::dispatch(args),
                Cmd::Info(args)     => info::dispatch(args),
                Cmd::Batch(args)    => batch::dispatch(args),
            }
        )
    }
}
