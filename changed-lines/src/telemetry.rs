//! Log output for the changed-lines library.
//!
//! Library events are written to stderr with UTC timestamps and source
//! locations; stdout is left to the caller's result.

use std::io::{self, IsTerminal};

use chrono::{SecondsFormat, Utc};
use tracing::{Level, Metadata};
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target prefix of every event emitted by this crate.
pub const TARGET_PREFIX: &str = "changed_lines";

/// True for events emitted from inside this crate.
pub fn is_library_event(meta: &Metadata<'_>) -> bool {
    meta.target().starts_with(TARGET_PREFIX)
}

/// `2025-09-12T10:20:30Z`
fn utc_seconds(w: &mut Writer<'_>) -> std::fmt::Result {
    w.write_str(&Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Compact stderr layer that only renders this crate's events.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let timer: fn(&mut Writer<'_>) -> std::fmt::Result = utc_seconds;
    let format = fmt::format()
        .compact()
        .with_timer(timer)
        .with_source_location(true);

    fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .event_format(format)
        .with_filter(filter::filter_fn(is_library_event))
}

fn library_directive(level: Level) -> Result<Directive, ParseError> {
    format!("{TARGET_PREFIX}={}", level.as_str().to_ascii_lowercase()).parse()
}

/// `RUST_LOG` (or `default` when unset) with this crate pinned to `level`.
pub fn env_filter_with_level(default: &str, level: Level) -> Result<EnvFilter, ParseError> {
    let base = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?;
    Ok(base.add_directive(library_directive(level)?))
}
