use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use trace_rbd::events;
use trace_rbd::layout::{compute_layout, LayoutBlock};
use trace_rbd::source::{parse_trace, FileSource, StreamSource, TraceSource};
use trace_rbd::ui::{self, CONTENT_START_ROW};
use trace_rbd::{App, ChainReport, ReportDocument, Settings};

#[derive(Parser, Debug)]
#[command(name = "trace-rbd")]
#[command(about = "Reliability block diagram and availability report for a network trace")]
struct Args {
    /// Path to a tracert/traceroute output file
    #[arg(short, long, default_value = "tr.txt", conflicts_with = "stdin")]
    file: PathBuf,

    /// Read trace lines from standard input as they arrive
    #[arg(long)]
    stdin: bool,

    /// TOML file with rate and layout settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refresh interval in seconds (only used with --file)
    #[arg(short, long, default_value = "1")]
    refresh: u64,

    /// Compute the report once, write it as JSON and exit
    #[arg(short, long, conflicts_with = "stdin")]
    export: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The TUI owns the terminal, so it only logs when given a file
    init_logging(args.log_file.as_deref(), args.export.is_some())?;

    let settings = Settings::load(args.config.as_deref())?;

    if let Some(export_path) = args.export {
        return export_to_file(&args.file, &export_path, &settings);
    }

    if args.stdin {
        return run_with_stdin(settings);
    }

    run_with_file(&args.file, settings, Duration::from_secs(args.refresh))
}

fn init_logging(log_file: Option<&Path>, to_stderr: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else if to_stderr {
        builder.with_writer(io::stderr).init();
    }
    Ok(())
}

/// Run with a file-based trace source
fn run_with_file(path: &Path, settings: Settings, refresh: Duration) -> Result<()> {
    info!(path = %path.display(), "watching trace file");
    let source = Box::new(FileSource::new(path));
    run_tui(source, settings, refresh)
}

/// Run with trace lines streamed on standard input
fn run_with_stdin(settings: Settings) -> Result<()> {
    // The runtime drives the reader task while the TUI runs on this thread
    let rt = tokio::runtime::Runtime::new()?;
    let source = rt.block_on(async { StreamSource::spawn(tokio::io::stdin(), "stdin") });

    let result = run_tui(Box::new(source), settings, Duration::from_millis(100));
    rt.shutdown_background();
    result
}

/// Run the TUI with the given trace source
fn run_tui(
    source: Box<dyn TraceSource>,
    settings: Settings,
    refresh_interval: Duration,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal before the panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(source, settings);
    app.reload_data();

    let result = run_app(&mut terminal, &mut app, refresh_interval);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse, CONTENT_START_ROW),
                _ => {}
            }
        }

        if last_refresh.elapsed() >= refresh_interval {
            app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Compute the report for a trace file and write it as JSON
fn export_to_file(trace_path: &Path, export_path: &Path, settings: &Settings) -> Result<()> {
    if !trace_path.exists() {
        bail!("trace file not found: {}", trace_path.display());
    }
    let text = std::fs::read_to_string(trace_path)
        .with_context(|| format!("cannot read trace file {}", trace_path.display()))?;

    let hops = parse_trace(&text);
    let report = ChainReport::from_hops(&hops, &settings.rates);
    let blocks: Vec<LayoutBlock> = report.components.iter().map(LayoutBlock::from).collect();
    let diagram = compute_layout(&blocks, &settings.layout);

    let source = format!("file: {}", trace_path.display());
    let document = ReportDocument::new(&source, &report, Some(&diagram));
    document
        .write_to(export_path)
        .with_context(|| format!("cannot write report to {}", export_path.display()))?;

    println!("{}", document.summary());
    if let Some(ref err) = document.diagram_error {
        println!("Diagram: {}", err);
    }
    println!("Exported report to: {}", export_path.display());
    Ok(())
}
