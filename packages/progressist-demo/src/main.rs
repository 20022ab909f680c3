use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

use anyhow::{Context as _, bail};
use clap::Parser;
use progressist::{Animation, ProgressBar, ProgressBarBuilder, Throttle, Update, Value};

/// Gallery of progress bars
#[derive(Debug, Parser)]
#[clap(version)]
struct Cli {
    /// Name of the example to run. Runs all of them if not set
    name: Option<String>,
    /// Delay between two items, in milliseconds
    #[clap(long, default_value_t = 200)]
    delay_ms: u64,
    /// Override the throttle of every example (`5`, `0.1`, `500ms`, `off`)
    #[clap(long)]
    throttle: Option<Throttle>,
    /// List the examples and exit
    #[clap(short, long)]
    list: bool,
    /// Print more logs. Can be repeated
    #[clap(short = 'v', long, action(clap::ArgAction::Count))]
    verbose: u8,
}

type Example = fn(&Cli) -> anyhow::Result<()>;

const EXAMPLES: &[(&str, Example)] = &[
    ("default", example_default),
    ("custom-done-char", example_custom_done_char),
    ("custom-remain-char", example_custom_remain_char),
    ("eta", example_eta),
    ("avg", example_avg),
    ("color", example_color),
    ("custom-field", example_custom_field),
    ("stream", example_stream),
    ("throttle", example_throttle),
    ("throttle-by-second", example_throttle_by_second),
    ("spinner", example_spinner),
    ("spinner-without-total", example_spinner_without_total),
    ("reverse-bar", example_reverse_bar),
    ("download", example_download),
];

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_log(cli.verbose);
    if cli.list {
        for (name, _) in EXAMPLES {
            println!("{name}");
        }
        return Ok(());
    }
    match &cli.name {
        Some(name) => {
            let Some((_, example)) = EXAMPLES.iter().find(|(n, _)| *n == name.as_str()) else {
                bail!("no example named '{name}', use --list to see them");
            };
            example(&cli).with_context(|| format!("example '{name}' failed"))?;
        }
        None => {
            for (name, example) in EXAMPLES {
                log::debug!("running example '{name}'");
                example(&cli).with_context(|| format!("example '{name}' failed"))?;
            }
        }
    }
    Ok(())
}

/// Run 20 items through the bar
fn run(cli: &Cli, builder: ProgressBarBuilder) -> anyhow::Result<()> {
    let builder = match cli.throttle {
        Some(throttle) => builder.throttle(throttle),
        None => builder,
    };
    let mut bar = builder.build().context("failed to build the bar")?;
    let delay = Duration::from_millis(cli.delay_ms);
    let mut items = bar.iter(0..20);
    for _ in &mut items {
        thread::sleep(delay);
    }
    if let Some(e) = items.take_error() {
        return Err(e).context("failed to render the bar");
    }
    Ok(())
}

fn example_default(cli: &Cli) -> anyhow::Result<()> {
    run(cli, progressist::progress("Default:").total(20))
}

fn example_custom_done_char(cli: &Cli) -> anyhow::Result<()> {
    run(
        cli,
        progressist::progress("Custom fill character:")
            .total(20)
            .done_char('█'),
    )
}

fn example_custom_remain_char(cli: &Cli) -> anyhow::Result<()> {
    run(
        cli,
        progressist::progress("Custom empty fill char:")
            .total(20)
            .done_char('◉')
            .remain_char('◯'),
    )
}

fn example_eta(cli: &Cli) -> anyhow::Result<()> {
    run(
        cli,
        ProgressBar::builder()
            .total(20)
            .template("With ETA: {animation} ETA: {eta}"),
    )
}

fn example_avg(cli: &Cli) -> anyhow::Result<()> {
    run(
        cli,
        ProgressBar::builder()
            .total(20)
            .template("With Average: {animation} Avg: {avg} s/item"),
    )
}

fn example_color(cli: &Cli) -> anyhow::Result<()> {
    run(
        cli,
        ProgressBar::builder()
            .total(20)
            .remain_char('-')
            .invisible_chars(11)
            .template("\r\x1b[34mCustom color: {animation}\x1b[39m"),
    )
}

fn example_custom_field(cli: &Cli) -> anyhow::Result<()> {
    run(
        cli,
        ProgressBar::builder()
            .total(20)
            .template("Custom field: {animation} CPUs: {cpus}")
            .field("cpus", |_| match thread::available_parallelism() {
                Ok(n) => Value::from(n.get()),
                Err(_) => Value::from("unknown"),
            }),
    )
}

fn example_stream(cli: &Cli) -> anyhow::Result<()> {
    run(
        cli,
        ProgressBar::builder()
            .total(20)
            .animation(Animation::Stream)
            .steps(['⎻', '⎼'])
            .template("Stream {animation} {elapsed}"),
    )
}

fn example_throttle(cli: &Cli) -> anyhow::Result<()> {
    run(cli, progressist::progress("Throttling").total(20).throttle(2))
}

fn example_throttle_by_second(cli: &Cli) -> anyhow::Result<()> {
    run(
        cli,
        progressist::progress("Throttling by second")
            .total(20)
            .throttle(Duration::from_secs(1)),
    )
}

fn example_spinner(cli: &Cli) -> anyhow::Result<()> {
    run(
        cli,
        progressist::progress("Spinner")
            .total(20)
            .animation(Animation::Spinner),
    )
}

fn example_spinner_without_total(cli: &Cli) -> anyhow::Result<()> {
    run(
        cli,
        ProgressBar::builder()
            .animation(Animation::Spinner)
            .steps("▁▂▃▄▅▆▇█".chars())
            .template("Spinner without total: {animation} Elapsed: {elapsed}"),
    )
}

fn example_reverse_bar(cli: &Cli) -> anyhow::Result<()> {
    let reverse = Animation::custom(|frame, width| {
        let done = progressist::anim::bar(
            frame.metrics.fraction,
            width,
            frame.config.done_char(),
            frame.config.remain_char(),
        );
        done.chars().rev().collect()
    });
    run(
        cli,
        ProgressBar::builder()
            .total(20)
            .animation(reverse)
            .template("{percent} {animation} Reverse bar"),
    )
}

/// A download resumed at 42%, with human readable sizes
fn example_download(cli: &Cli) -> anyhow::Result<()> {
    const TOTAL: u64 = 197_739_688;
    const BLOCK: u64 = 165_889;
    let mut bar = ProgressBar::builder()
        .done_char('█')
        .template("Download |{animation}| {done:B}/{total:B} ({speed:B}/s)")
        .build()
        .context("failed to build the bar")?;
    let delay = Duration::from_millis(cli.delay_ms / 100);
    for done in (82_944_500..=TOTAL + BLOCK).step_by(BLOCK as usize) {
        thread::sleep(delay);
        bar.update(Update::new().done(done.min(TOTAL)).total(TOTAL))?;
    }
    Ok(())
}

static LOG_FILTER: OnceLock<env_filter::Filter> = OnceLock::new();

/// Log to stderr, so logs don't mix with the bars. `RUST_LOG` takes
/// precedence over the verbose flag
fn init_log(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let log_level = match std::env::var("RUST_LOG") {
        Ok(value) if !value.is_empty() => {
            let mut builder = env_filter::Builder::new();
            let filter = builder.parse(&value).build();
            let log_level = filter.filter();
            let _ = LOG_FILTER.set(filter);
            log_level.max(level)
        }
        _ => level,
    };
    log::set_max_level(log_level);
    let _ = log::set_logger(&LogImpl);
}

struct LogImpl;
impl log::Log for LogImpl {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        match LOG_FILTER.get() {
            Some(filter) => filter.enabled(metadata),
            None => metadata.level() <= log::max_level(),
        }
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // on its own line, the bar is redrawn on the next render
        eprintln!(
            "\n[{} {}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}
