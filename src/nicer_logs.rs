use std::io::Write;

use tracing::{Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::Context;


/// One line per event: `HHMMSS.mmm LEVEL file:line message`.
/// Events at or above `stderr_max_level` severity are duplicated to stderr,
/// unless the main writer already is stderr.
pub struct CustomLayer<W> {
    writer: W,
    writer_is_stderr: bool,
    writer_max_level: Level,
    stderr_max_level: Level,
}

impl<W> CustomLayer<W>
where
    W: for<'a> MakeWriter<'a> + Send + 'static,
{
    pub fn new(writer: W, writer_is_stderr: bool, writer_max_level: Level, stderr_max_level: Level) -> Self {
        Self {
            writer,
            writer_is_stderr,
            writer_max_level,
            stderr_max_level,
        }
    }
}

struct MessageVisitor {
    message: String,
    extra: Vec<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.extra.push(format!("{}={:?}", field.name(), value));
        }
    }
}

fn format_event(event: &tracing::Event) -> String {
    let mut visitor = MessageVisitor { message: String::new(), extra: vec![] };
    event.record(&mut visitor);
    let meta = event.metadata();
    let location = match (meta.file(), meta.line()) {
        (Some(file), Some(line)) => format!(" {}:{}", file, line),
        _ => String::new(),
    };
    let timestamp = chrono::Local::now().format("%H%M%S%.3f");
    let mut line = format!("{} {}{} {}", timestamp, meta.level(), location, visitor.message);
    if !visitor.extra.is_empty() {
        line.push(' ');
        line.push_str(&visitor.extra.join(" "));
    }
    line
}

impl<S, W> Layer<S> for CustomLayer<W>
where
    S: Subscriber + Send + 'static,
    W: for<'a> MakeWriter<'a> + Send + 'static,
{
    fn on_event(&self, event: &tracing::Event, _: Context<S>) {
        let level = event.metadata().level();
        let to_stderr = level <= &self.stderr_max_level;
        let to_writer = level <= &self.writer_max_level && !(to_stderr && self.writer_is_stderr);
        if !to_stderr && !to_writer {
            return;
        }
        let line = format_event(event);
        if to_stderr {
            let _ = writeln!(std::io::stderr(), "{}", line);
        }
        if to_writer {
            let mut writer = self.writer.make_writer();
            let _ = writeln!(writer, "{}", line);
        }
    }
}


pub fn first_n_chars(msg: &str, n: usize) -> String {
    let mut first: String = msg.chars().take(n).collect();
    if msg.chars().count() > n {
        first.push_str("...");
    }
    first.replace("\n", "\\n")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_n_chars() {
        assert_eq!(first_n_chars("hello", 10), "hello");
        assert_eq!(first_n_chars("hello\nworld", 7), "hello\\nw...");
    }
}
