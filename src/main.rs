use background_shuffler::{
    native_setter, parse_invocation, usage, Args, BackgroundSetter, BaseDirectory, CommandSetter,
    ExitStatus, Invocation, Scheduler, StopSignal,
};
use log::LevelFilter;
use std::io;
use std::process;
use std::time::Duration;

fn init_logging(debug: bool) {
    let level = if debug { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new().filter_level(level).init();
}

fn exit_with(status: ExitStatus) -> ! {
    process::exit(status.code())
}

fn select_setter(args: &Args) -> Result<Box<dyn BackgroundSetter>, ExitStatus> {
    match &args.command {
        Some(command) => match CommandSetter::new(command.as_str()) {
            Ok(setter) => Ok(Box::new(setter)),
            Err(e) => {
                println!("{e}");
                println!("{}", usage());
                Err(ExitStatus::ArgumentError)
            }
        },
        None => native_setter().ok_or_else(|| {
            println!("Unfortunately, we only support Windows.");
            ExitStatus::UnsupportedPlatform
        }),
    }
}

fn main() -> anyhow::Result<()> {
    let args = match parse_invocation(std::env::args_os()) {
        Invocation::Run(args) => args,
        Invocation::Exit(status) => exit_with(status),
    };
    init_logging(args.debug);

    let Some(path) = args.base_directory() else {
        println!("Missing options.");
        println!("{}", usage());
        exit_with(ExitStatus::MissingPath);
    };

    let setter = select_setter(&args).unwrap_or_else(|status| exit_with(status));

    let base = match BaseDirectory::open(path) {
        Ok(base) => base,
        Err(e) => {
            println!("{e}");
            println!("Base directory doesn't meet requirements.");
            exit_with(ExitStatus::InvalidBaseDirectory);
        }
    };

    let iterations = args.iterations.map(|n| usize::try_from(n).unwrap_or(usize::MAX));
    let mut scheduler = Scheduler::new(base, setter)
        .with_interval(Duration::from_secs(args.time))
        .with_max_iterations(iterations);

    let stdout = io::stdout();
    scheduler.run(&mut stdout.lock(), &StopSignal::new())?;

    Ok(())
}
