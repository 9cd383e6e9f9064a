use std::fs::OpenOptions;
use std::sync::Mutex;

use chrono::Local;
use colored::*;
use routes_common::config::Config;
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, fmt};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Console output: a status symbol, then the message.
///
/// Warnings and errors color the message as well as the symbol. Writers
/// without ANSI support get plain text.
pub struct ConsoleFormatter;

fn status_symbol(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "[ ]",
        Level::DEBUG => "[?]",
        Level::INFO => "[+]",
        Level::WARN => "[*]",
        Level::ERROR => "[-]",
    }
}

impl<S, N> FormatEvent<S, N> for ConsoleFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let level = event.metadata().level();
        let symbol = status_symbol(level);

        let mut message = String::new();
        ctx.field_format().format_fields(Writer::new(&mut message), event)?;

        if !writer.has_ansi_escapes() {
            return writeln!(writer, "{symbol} {message}");
        }

        let (symbol, message) = match *level {
            Level::TRACE => (symbol.dimmed(), message.dimmed()),
            Level::DEBUG => (symbol.blue(), message.normal()),
            Level::INFO => (symbol.green().bold(), message.normal()),
            Level::WARN => (symbol.yellow().bold(), message.yellow()),
            Level::ERROR => (symbol.red().bold(), message.red()),
        };

        writeln!(writer, "{symbol} {message}")
    }
}

/// Log file output: `2026-10-16 12:00:00.123 - INFO - message`.
pub struct TimestampFormatter;

impl<S, N> FormatEvent<S, N> for TimestampFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let now = Local::now().format(TIMESTAMP_FORMAT);
        write!(writer, "{now} - {} - ", event.metadata().level())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Builds the two-layer subscriber and makes it the default for this thread.
///
/// Logging stops when the returned guard is dropped.
pub fn init(cfg: &Config) -> std::io::Result<DefaultGuard> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cfg.log_file)?;

    let console_filter = if cfg.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .event_format(ConsoleFormatter)
        .with_filter(console_filter);

    let file = fmt::layer()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .event_format(TimestampFormatter)
        .with_filter(EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry().with(console).with(file);
    Ok(tracing::subscriber::set_default(subscriber))
}
