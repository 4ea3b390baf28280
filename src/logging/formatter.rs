use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Event formatter that wraps each field in brackets.
/// Format: [TIMESTAMP] [LEVEL] [SPANS] [TARGET: FILE:LINE]: MESSAGE
///
/// SPANS is the chain of active span names from the root, each followed by
/// its recorded fields, e.g. `group{name=training}`. Events outside any span
/// show the last segment of their target instead.
pub struct BracketedFormatter;

impl<S, N> FormatEvent<S, N> for BracketedFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        let now = chrono::Local::now();
        write!(writer, "[{}] ", now.format("%Y-%m-%dT%H:%M:%S%.3f"))?;
        write!(writer, "[{:5}] ", metadata.level())?;

        write!(writer, "[")?;
        match ctx.event_scope() {
            Some(scope) => {
                for (idx, span) in scope.from_root().enumerate() {
                    if idx > 0 {
                        write!(writer, ":")?;
                    }
                    write!(writer, "{}", span.name())?;

                    let extensions = span.extensions();
                    if let Some(fields) = extensions.get::<tracing_subscriber::fmt::FormattedFields<N>>() {
                        if !fields.is_empty() {
                            write!(writer, "{{{}}}", fields)?;
                        }
                    }
                }
            }
            None => {
                let module = metadata.target().rsplit("::").next().unwrap_or("unknown");
                write!(writer, "{}", module)?;
            }
        }
        write!(writer, "] ")?;

        match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => write!(writer, "[{}: {}:{}]: ", metadata.target(), file, line)?,
            _ => write!(writer, "[{}]: ", metadata.target())?,
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
