use crate::scheduler::DEFAULT_SLIDESHOW_SECS;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Process exit codes. The loop itself never exits on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Help = 0,
    UnsupportedPlatform = 1,
    ArgumentError = 2,
    MissingPath = 3,
    InvalidBaseDirectory = 4,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[derive(Parser, Clone, Debug)]
#[command(name = "background-shuffler")]
#[command(about = "Rotate the desktop background through time-of-day image folders")]
#[command(override_usage = "background-shuffler -p <base_directory> -t <slideshow time>\n       \
    background-shuffler --PATH=<base_directory> --TIME=<slideshow time>")]
pub struct Args {
    /// Base directory holding the forenoon, noon, afternoon, dusk and night subfolders
    #[arg(short = 'p', long = "PATH", value_name = "base_directory")]
    pub path: Option<OsString>,

    /// Seconds to wait between background changes
    #[arg(short = 't', long = "TIME", value_name = "seconds", default_value_t = DEFAULT_SLIDESHOW_SECS)]
    pub time: u64,

    /// External command used to apply the image instead of the desktop shell API
    #[arg(short, long)]
    pub command: Option<String>,

    /// Stop after this many background changes
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub iterations: Option<u64>,

    #[arg(long, help = "Enable debug output")]
    pub debug: bool,
}

impl Args {
    /// The base directory, treating an empty `-p ""` the same as no `-p` at all.
    pub fn base_directory(&self) -> Option<PathBuf> {
        self.path
            .as_ref()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }
}

/// Outcome of reading the command line before any work starts.
#[derive(Debug)]
pub enum Invocation {
    Run(Args),
    Exit(ExitStatus),
}

pub fn usage() -> String {
    Args::command().render_help().to_string()
}

/// Parses `argv`, printing help or the parse diagnostic when the process should stop.
pub fn parse_invocation<I, T>(argv: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Args::try_parse_from(argv) {
        Ok(args) => Invocation::Run(args),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{e}");
            Invocation::Exit(ExitStatus::Help)
        }
        Err(e) => {
            eprint!("{e}");
            println!("Failed to parse options.");
            println!("{}", usage());
            Invocation::Exit(ExitStatus::ArgumentError)
        }
    }
}
