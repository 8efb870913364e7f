use super::print::{print_config, print_messages, print_paths, print_text};
use super::setup::{Cli, Commands};
use clap::Parser;
use codesync::api::SyncApi;
use codesync::commands::config::ConfigAction;
use codesync::commands::preview::PreviewMode;
use codesync::commands::{self, CmdResult};
use codesync::config::SyncConfig;
use codesync::error::{Result, SyncError};
use codesync::extensions::CodeCli;
use codesync::machine::MachineInfo;
use codesync::paths::{default_user_dir, LocalFiles, UserFile};
use codesync::store::dir::DirStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const CONFIG_DIR_ENV: &str = "CODESYNC_CONFIG_DIR";
const LOG_ENV: &str = "CODESYNC_LOG";

struct AppContext {
    api: SyncApi<DirStore, CodeCli>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let config_dir = config_dir()?;
    debug!(config_dir = %config_dir.display(), "loaded configuration directory");

    // config and paths run without a remote directory
    match cli.command {
        Commands::Config { key, value } => handle_config(&config_dir, key, value),
        Commands::Paths => handle_paths(&config_dir),
        Commands::Upload => handle_upload(&mut init_context(&config_dir)?),
        Commands::Download => handle_download(&mut init_context(&config_dir)?),
        Commands::Status => handle_status(&mut init_context(&config_dir)?),
        Commands::Preview { file, download } => {
            handle_preview(&mut init_context(&config_dir)?, &file, download)
        }
    }
}

fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "codesync", "codesync")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SyncError::Config("Unable to determine a configuration directory".into()))
}

fn load_config(config_dir: &Path) -> Result<SyncConfig> {
    Ok(SyncConfig::load(config_dir)?.with_env_overrides())
}

fn local_files(config: &SyncConfig) -> Result<LocalFiles> {
    let user_dir = match &config.user_dir {
        Some(dir) => dir.clone(),
        None => default_user_dir()?,
    };
    Ok(LocalFiles::new(user_dir))
}

fn init_context(config_dir: &Path) -> Result<AppContext> {
    let config = load_config(config_dir)?;
    let machine = MachineInfo::detect(config.hostname.as_deref())?;

    let store = DirStore::new(config.remote_dir()?.to_path_buf());
    let host = match &config.editor_bin {
        Some(bin) => CodeCli::new(bin.clone()),
        None => CodeCli::for_os(machine.os),
    };
    let local = local_files(&config)?;

    let api = SyncApi::new(store, host, local, machine, config);
    let machine = api.machine();
    debug!(hostname = %machine.hostname, os = %machine.os, "detected machine");

    Ok(AppContext { api })
}

fn finish(result: &CmdResult) -> Result<()> {
    print_messages(&result.messages);
    Ok(())
}

fn handle_upload(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.upload()?;
    finish(&result)
}

fn handle_download(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.download()?;
    for path in &result.written {
        debug!(path = %path.display(), "wrote local file");
    }
    finish(&result)
}

fn handle_status(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.status()?;
    finish(&result)
}

fn handle_preview(ctx: &mut AppContext, file: &str, download: bool) -> Result<()> {
    let file = UserFile::parse(file).ok_or_else(|| {
        SyncError::Config(format!(
            "Unknown file {}, expected one of: settings, keybindings, locale",
            file
        ))
    })?;
    let mode = if download {
        PreviewMode::Download
    } else {
        PreviewMode::Upload
    };

    let result = ctx.api.preview(file, mode)?;
    if let Some(text) = &result.text {
        print_text(text);
    }
    finish(&result)
}

fn handle_config(
    config_dir: &Path,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = commands::config::run(config_dir, action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    finish(&result)
}

fn handle_paths(config_dir: &Path) -> Result<()> {
    let config = load_config(config_dir)?;
    let local = local_files(&config)?;
    let result = commands::paths::run(&local, &config)?;
    print_paths(&result.paths);
    finish(&result)
}
