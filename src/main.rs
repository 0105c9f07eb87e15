//! fbprogress - progress overlay for a Linux framebuffer.
//!
//! Usage:
//!   fbprogress [-c CONFIG] [-p PIPE] [-d DEVICE]
//!
//! Then, from anywhere:
//!   echo "42 Installing package-foo" > /tmp/fbprogress_pipe
//!   echo QUIT > /tmp/fbprogress_pipe

use anyhow::{bail, Context, Result};
use fbprogress::actor::DEFAULT_PIPE_PATH;
use fbprogress::device::DEFAULT_DEVICE_PATH;
use fbprogress::{Config, Engine, FifoSource, Framebuffer, PipeActor, RenderSession};
use log::{error, info};
use std::path::PathBuf;

/// Config file looked up next to the executable.
const CONFIG_FILE_NAME: &str = "fbprogress.cfg";

/// Progress steps requested at open.
const STEPS: u32 = 2;

/// Status shown before the first command arrives.
const INITIAL_STATUS: &str = "Start....";

/// Command-line options.
#[derive(Debug)]
struct Options {
    config: PathBuf,
    pipe: PathBuf,
    device: PathBuf,
}

fn print_help() {
    println!("fbprogress {}", env!("CARGO_PKG_VERSION"));
    println!("Progress overlay painted onto a Linux framebuffer");
    println!();
    println!("USAGE:");
    println!("    fbprogress [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Config file [default: <exe dir>/{CONFIG_FILE_NAME}]");
    println!("    -p, --pipe <PATH>      Command pipe [default: {DEFAULT_PIPE_PATH}]");
    println!("    -d, --device <PATH>    Framebuffer device [default: {DEFAULT_DEVICE_PATH}]");
    println!("    -h, --help             Print help");
    println!("    -V, --version          Print version");
    println!();
    println!("COMMANDS (one per line, written to the pipe):");
    println!("    <percent> <text>       Show <text> and move the bar to <percent>");
    println!("    QUIT                   Erase the overlay and exit");
    println!();
    println!("Set RUST_LOG=debug to log every received line.");
}

/// `<exe dir>/fbprogress.cfg`, or `fbprogress.cfg` if the executable path is unknown.
fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Parse options; `None` means help or version was printed.
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options {
        config: default_config_path(),
        pipe: PathBuf::from(DEFAULT_PIPE_PATH),
        device: PathBuf::from(DEFAULT_DEVICE_PATH),
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(None);
            }
            "-V" | "--version" => {
                println!("fbprogress {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            "-c" | "--config" | "-p" | "--pipe" | "-d" | "--device" => {
                let value = iter
                    .next()
                    .with_context(|| format!("{arg} requires a path"))?;
                let target = match arg.as_str() {
                    "-c" | "--config" => &mut options.config,
                    "-p" | "--pipe" => &mut options.pipe,
                    _ => &mut options.device,
                };
                *target = PathBuf::from(value);
            }
            other => bail!("unknown option '{other}' (try --help)"),
        }
    }
    Ok(Some(options))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let Some(options) = parse_args(&args)? else {
        return Ok(());
    };

    info!("fbprogress {} starting", env!("CARGO_PKG_VERSION"));

    let fifo = FifoSource::create(&options.pipe)
        .with_context(|| format!("cannot create pipe {}", options.pipe.display()))?;
    let fifo_guard = fifo.remove_on_drop();

    let config = Config::load(&options.config);
    let mut session = RenderSession::new(config);
    match Framebuffer::open(&options.device) {
        Ok(framebuffer) => {
            // Failure is already logged; the overlay just stays invisible.
            let _ = session.open(framebuffer, STEPS);
        }
        Err(e) => error!("{e}, continuing without display"),
    }
    session.show();
    session.set_step_text(INITIAL_STATUS);

    let actor = PipeActor::spawn(fifo.clone()).context("cannot start pipe reader")?;
    let mut engine = Engine::new(session, actor.receiver().clone());
    info!("listening on {}", fifo.path().display());

    let reason = engine.run();
    info!("shutting down: {reason:?}");

    actor.shutdown();
    drop(fifo_guard);
    engine.into_session().close();

    Ok(())
}
