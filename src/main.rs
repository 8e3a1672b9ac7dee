use crate::widgets::Terminal;
use std::io::IsTerminal;
use std::sync::Arc;

#[macro_use]
mod macros;

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod helper;
pub mod logger;
pub mod render;
pub mod ui;
pub mod views;
pub mod widgets;

#[macro_use]
extern crate rust_i18n;
i18n!("locales");

use data::{StaticResolver, TokenResolver};

#[tokio::main]
async fn main() {
    let bin_name = std::env::args()
        .next()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    let command = match cli::parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{}", err.message);
            std::process::exit(err.code);
        }
    };

    let args = match command {
        cli::Command::Help => {
            println!("{}", cli::help_text(&bin_name));
            return;
        }
        cli::Command::Version => {
            println!("{}", cli::version_text());
            return;
        }
        cli::Command::Run(args) => args,
    };

    dotenvy::dotenv().ok();

    let config = match config::Config::load(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("配置无效：{err:#}");
            std::process::exit(2);
        }
    };

    if !std::io::stdout().is_terminal() {
        eprintln!("Token Detail 需要在交互式终端（TTY）中运行。");
        std::process::exit(1);
    }

    rust_i18n::set_locale(&config.locale);
    ui::styles::set_color_mode(config.color_mode);

    let _guard = match logger::init() {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    };
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
        locale = %config.locale,
        color_mode = %config.color_mode,
        log_dir = %logger::active_log_dir().display(),
        "应用启动"
    );

    let resolver = match &config.data {
        Some(path) => match StaticResolver::from_file(path, config.delay) {
            Ok(resolver) => resolver,
            Err(err) => {
                tracing::error!(error = %format!("{err:#}"), "数据文件加载失败");
                eprintln!("{err:#}");
                std::process::exit(2);
            }
        },
        None => StaticResolver::placeholder(config.delay),
    };
    tracing::debug!(ids = ?resolver.ids(), delay = ?config.delay, "代币数据就绪");
    let resolver: Arc<dyn TokenResolver> = Arc::new(resolver);

    // restore the terminal even if the UI panics
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        Terminal::exit_full_screen();
        hook(info);
    }));

    Terminal::enter_full_screen();
    let screen = scopeguard::guard((), |()| Terminal::exit_full_screen());

    let result = tokio::select! {
        result = app::run(config, resolver) => result,
        _ = wait_for_shutdown_signal() => {
            tracing::warn!("收到退出信号，正在退出");
            Ok(())
        }
    };

    drop(screen);
    if let Err(err) = result {
        tracing::error!(error = %format!("{err:#}"), "应用异常退出");
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
    use std::future::pending;
    use tokio::signal::unix::{signal, Signal, SignalKind};

    async fn recv_or_pending(signal: Option<Signal>) {
        let mut signal = signal;
        if let Some(sig) = signal.as_mut() {
            let _ = sig.recv().await;
            return;
        }
        pending::<()>().await;
    }

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = recv_or_pending(signal(SignalKind::terminate()).ok()) => {}
        _ = recv_or_pending(signal(SignalKind::hangup()).ok()) => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
