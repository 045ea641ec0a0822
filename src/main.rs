use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use line_term::{Display, PtyInvoker, Session, SessionConfig, TtyDisplay};
use log::LevelFilter;
use simplelog::WriteLogger;
use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

/// Line-buffered terminal for a line-oriented program.
///
/// Each submitted line runs PROGRAM with the line's words as arguments.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Program to host; used as argv[0] and in the echoed prompt.
    program: String,

    /// Milliseconds of silence after which a running program is taken to be waiting for input.
    #[arg(long, default_value_t = 500)]
    quiet_ms: u64,

    /// Push the joined command onto history after answering a read.
    #[arg(long)]
    record_continuations: bool,

    #[arg(long, default_value = "> ")]
    prompt: String,

    /// Where to write logs; the terminal itself is the display.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn init_logging(args: &Args) -> Result<()> {
    let path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("line_term.log"));
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    WriteLogger::init(args.log_level, simplelog::Config::default(), file)?;
    Ok(())
}

fn redraw_input(session: &mut Session<TtyDisplay<Stdout>>) {
    let buffer = session.editor().buffer().clone();
    session.display_mut().render_input(&buffer);
}

fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
}

async fn run(args: Args) -> Result<()> {
    let config = SessionConfig::new(args.program.clone())
        .record_continuations(args.record_continuations);
    let mut session: Session<TtyDisplay<Stdout>> =
        Session::new(config, TtyDisplay::new(io::stdout(), args.prompt.clone()));
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let invoker = PtyInvoker::new(Duration::from_millis(args.quiet_ms)).size(rows, cols);

    let _raw = line_term::RawMode::enable()?;
    redraw_input(&mut session);

    let mut events = EventStream::new();
    while let Some(event) = events.next().await {
        let key = match event.context("reading terminal events")? {
            Event::Key(key) => key,
            _ => continue,
        };
        if is_quit(&key) {
            break;
        }

        if let Some(argv) = session.handle_key(&key) {
            redraw_input(&mut session);
            if let Err(err) = invoker.invoke(&argv, &mut session).await {
                log::error!("{err:#}");
                session.display_mut().append(&format!("error: {err:#}\n"));
            }
        }
        redraw_input(&mut session);
    }
    session.display_mut().append("\n");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    log::info!("hosting {}", args.program);
    run(args).await
}
