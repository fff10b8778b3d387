// SPDX-License-Identifier: MPL-2.0
use gowisata::app::{self, paths, Flags};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`RUST_LOG` syntax).
const LOG_ENV: &str = "GOWISATA_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("info,wgpu_core=warn,wgpu_hal=warn,naga=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> iced::Result {
    init_logging();

    let mut args = pico_args::Arguments::from_env();

    let lang = args.opt_value_from_str("--lang").unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring invalid --lang");
        None
    });
    let data_dir: Option<String> = args.opt_value_from_str("--data-dir").unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring invalid --data-dir");
        None
    });
    let config_dir: Option<String> =
        args.opt_value_from_str("--config-dir").unwrap_or_else(|err| {
            tracing::warn!(%err, "ignoring invalid --config-dir");
            None
        });

    paths::init_cli_overrides(data_dir.clone(), config_dir.clone());

    let flags = Flags {
        lang,
        file_path: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
        data_dir,
        config_dir,
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");
    app::run(flags)
}
