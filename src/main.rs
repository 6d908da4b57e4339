use std::env;
use std::io::Write;
use std::panic;
use std::path::Path;

use structopt::StructOpt;
use tracing::{error, info, Level};
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use blogpost_worker::global_context::{self, CommandLine};
use blogpost_worker::{http, nicer_logs};


#[tokio::main]
async fn main() {
    let cmdline = CommandLine::from_args();
    let mut writer_is_stderr = false;
    let (logs_writer, _guard) = if cmdline.logs_stderr {
        writer_is_stderr = true;
        tracing_appender::non_blocking(std::io::stderr())
    } else if !cmdline.logs_to_file.is_empty() {
        let path = Path::new(&cmdline.logs_to_file);
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        let file_name = path.file_name().map(|f| f.to_os_string()).unwrap_or_else(|| "blogworker.log".into());
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
    } else {
        let _ = write!(std::io::stderr(), "This binary keeps logs as files, rotated daily. Try\ntail -f {}/\nor use --logs-stderr for debugging. Any errors will duplicate here in stderr.\n\n", cmdline.logs_dir);
        let appender = tracing_appender::rolling::RollingFileAppender::builder()
            .rotation(tracing_appender::rolling::Rotation::DAILY)
            .filename_prefix("blogworker")
            .max_log_files(30)
            .build(&cmdline.logs_dir);
        match appender {
            Ok(appender) => tracing_appender::non_blocking(appender),
            Err(e) => {
                let _ = write!(std::io::stderr(), "cannot write logs to {}: {}, using stderr\n", cmdline.logs_dir, e);
                writer_is_stderr = true;
                tracing_appender::non_blocking(std::io::stderr())
            }
        }
    };
    let my_layer = nicer_logs::CustomLayer::new(
        logs_writer.clone(),
        writer_is_stderr,
        if cmdline.verbose { Level::DEBUG } else { Level::INFO },
        Level::ERROR,
    );
    let _tracing = tracing_subscriber::registry()
        .with(my_layer)
        .init();

    panic::set_hook(Box::new(|panic_info| {
        let backtrace = backtrace::Backtrace::new();
        tracing::error!("Panic occurred: {:?}\n{:?}", panic_info, backtrace);
    }));

    {
        info!("{:>20} {}", "version", env!("CARGO_PKG_VERSION"));
        let mut api_key_at: usize = usize::MAX;
        for (arg_n, arg_v) in env::args().enumerate() {
            info!("cmdline[{}]: {:?}", arg_n, if arg_n != api_key_at { arg_v.as_str() } else { "***" } );
            if arg_v == "--api-key" || arg_v == "-k" { api_key_at = arg_n + 1; }
        }
        info!("endpoint style {}, model {}", cmdline.endpoint_style, cmdline.model);
    }

    let gcx = match global_context::create_global_context(cmdline).await {
        Ok(gcx) => gcx,
        Err(e) => {
            error!("cannot start: {}", e);
            std::process::exit(1);
        }
    };

    match http::start_server(gcx.clone()).await {
        Some(handle) => {
            let _ = handle.await;
        }
        None => {
            error!("--http-port 0, nothing to do");
        }
    }
    info!("bb\n");
}
