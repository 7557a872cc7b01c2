// SPDX-License-Identifier: MPL-2.0
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use toast_dispatch::config::{self, Config};
use toast_dispatch::notifications::{
    expiry, toast, Container, ExpiryPolicy, NotificationId, NotificationType, Store, TextRenderer,
};

const HELP: &str = "\
toast_dispatch - fire toast notifications and print the container view

USAGE:
  toast_dispatch [OPTIONS] [KIND:MESSAGE]...

KIND is one of success, error, info, warning. A MESSAGE without a known
KIND prefix is sent as info.

OPTIONS:
  --config PATH     Read settings from PATH instead of the default location
  --wait SECS       Run the expiry timer for SECS seconds, then print again
  --dismiss-first   Dismiss the oldest notification after the first view
  --ids             Show notification ids
  -h, --help        Print this help
";

struct Flags {
    config_path: Option<PathBuf>,
    wait_secs: Option<u64>,
    dismiss_first: bool,
    show_ids: bool,
    notifications: Vec<(NotificationType, String)>,
}

fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags, String> {
    let config_path = args
        .opt_value_from_str("--config")
        .map_err(|e| e.to_string())?;
    let wait_secs = args
        .opt_value_from_str("--wait")
        .map_err(|e| e.to_string())?;
    let dismiss_first = args.contains("--dismiss-first");
    let show_ids = args.contains("--ids");

    let notifications = args
        .finish()
        .into_iter()
        .map(parse_notification)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Flags {
        config_path,
        wait_secs,
        dismiss_first,
        show_ids,
        notifications,
    })
}

fn parse_notification(raw: OsString) -> Result<(NotificationType, String), String> {
    let raw = raw
        .into_string()
        .map_err(|raw| format!("argument is not valid UTF-8: {raw:?}"))?;
    // A prefix that is not a known kind is part of the message.
    let parsed = raw.split_once(':').and_then(|(kind, message)| {
        kind.parse::<NotificationType>()
            .ok()
            .map(|kind| (kind, message.to_string()))
    });
    Ok(parsed.unwrap_or((NotificationType::Info, raw)))
}

fn load_config(path: Option<&PathBuf>) -> Config {
    let (config, warning) = match path {
        Some(path) => match config::load_from_path(path) {
            Ok(config) => (config, None),
            Err(err) => (Config::default(), Some(err.to_string())),
        },
        None => config::load(),
    };
    if let Some(warning) = warning {
        log::warn!("Using default settings: {warning}");
    }
    config
}

fn dispatch(kind: NotificationType, message: String) -> NotificationId {
    match kind {
        NotificationType::Success => toast::success(message),
        NotificationType::Error => toast::error(message),
        NotificationType::Info => toast::info(message),
        NotificationType::Warning => toast::warning(message),
    }
}

fn print_view(container: &Container, show_ids: bool) {
    let lines = container.view(&mut TextRenderer::new().with_ids(show_ids));
    if lines.is_empty() {
        println!("(no notifications)");
    }
    for line in lines {
        println!("{line}");
    }
}

fn main() -> ExitCode {
    if let Err(err) = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()
    {
        eprintln!("failed to initialize logger: {err}");
    }

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let flags = match parse_flags(args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    let config = load_config(flags.config_path.as_ref());
    if toast::install(Store::with_config(&config)).is_err() {
        log::warn!("Global notification store was already initialized");
    }

    for (kind, message) in flags.notifications {
        dispatch(kind, message);
    }

    let container = Container::global().with_expiry(ExpiryPolicy::from_config(&config.expiry));
    print_view(&container, flags.show_ids);

    if flags.dismiss_first {
        if let Some(first) = container.visible().items().first() {
            container.dismiss(first.id());
            println!("-- dismissed {}", first.id());
            print_view(&container, flags.show_ids);
        }
    }

    if let Some(secs) = flags.wait_secs {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                eprintln!("error: failed to start runtime: {err}");
                return ExitCode::FAILURE;
            }
        };
        let period = config.expiry.tick_interval();
        runtime.block_on(async {
            let task = expiry::spawn(container.clone(), period);
            tokio::time::sleep(Duration::from_secs(secs)).await;
            task.abort();
        });
        println!("-- after {secs}s");
        print_view(&container, flags.show_ids);
    }

    ExitCode::SUCCESS
}
