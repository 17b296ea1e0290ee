//! Tracing layers for the policy assistant.
//!
//! Logs go to **stderr** so they never interleave with the rendered answer
//! on stdout.

use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Crate target prefix used to filter only library-originated logs.
pub const TARGET_PREFIX: &str = "answer_client";

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Library-scoped formatting layer that renders ONLY events emitted by this crate.
///
/// - RFC3339 UTC timestamps
/// - Compact single-line format with `file:line`
/// - Span close events (duration of instrumented HTTP calls)
/// - ANSI colors only when stderr is a terminal
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let only_this_crate = filter::filter_fn(|meta| meta.target().starts_with(TARGET_PREFIX));

    fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(
            fmt::format()
                .with_timer(ChronoRfc3339Utc)
                .with_level(true)
                .with_target(true)
                .compact()
                .with_source_location(true),
        )
        .with_filter(only_this_crate)
}

/// Formatting layer for every other target (session, console, binary).
pub fn app_layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let not_this_crate = filter::filter_fn(|meta| !meta.target().starts_with(TARGET_PREFIX));

    fmt::layer()
        .with_writer(io::stderr)
        .with_timer(ChronoRfc3339Utc)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .compact()
        .with_filter(not_this_crate)
}

/// Level directive for **this** library only, e.g. `answer_client=debug`.
pub fn level_directive(level: Level) -> Option<Directive> {
    format!("{TARGET_PREFIX}={}", level.as_str().to_lowercase())
        .parse()
        .ok()
}

/// `EnvFilter` from `RUST_LOG`, or `default` plus a per-crate `level` when
/// `RUST_LOG` is unset.
///
/// The per-crate directive is only a fallback so an explicit
/// `RUST_LOG=answer_client=trace` is never overridden.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let base = EnvFilter::new(default);
            match level_directive(level) {
                Some(d) => base.add_directive(d),
                None => base,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_targets_this_crate() {
        let d = level_directive(Level::DEBUG).unwrap();
        assert_eq!(d.to_string(), "answer_client=debug");
    }
}
