use std::path::{Path, PathBuf};

use flexi_logger::{
    default_format, detailed_format, Cleanup, Criterion, Duplicate, FileSpec, Logger,
    LoggerHandle, Naming,
};

use crate::config::{ConfigPaths, LoggingConfig};

const DEFAULT_LOG_STEM: &str = "webai";

/// Where the rotating log lives once `[logging] path` has been applied.
#[derive(Debug, PartialEq, Eq)]
struct LogTarget {
    directory: PathBuf,
    basename: String,
}

impl LogTarget {
    fn resolve(configured: Option<&str>, logs_dir: &Path) -> Self {
        let Some(path) = configured.map(Path::new) else {
            return Self {
                directory: logs_dir.to_path_buf(),
                basename: DEFAULT_LOG_STEM.to_string(),
            };
        };
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => logs_dir.to_path_buf(),
        };
        let basename = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_LOG_STEM)
            .to_string();
        Self {
            directory,
            basename,
        }
    }

    fn file_spec(self) -> FileSpec {
        FileSpec::default()
            .directory(self.directory)
            .basename(self.basename)
    }
}

/// Detailed records go to the log file. Warnings and errors, such as retry
/// notices and service failures, are echoed to stderr so the terminal user
/// sees them next to the transcript.
///
/// The returned handle must stay alive for as long as logs should be written.
pub fn init_logging(config: &LoggingConfig, paths: &ConfigPaths) -> anyhow::Result<LoggerHandle> {
    let target = LogTarget::resolve(config.path.as_deref(), &paths.logs_dir);
    let handle = Logger::try_with_env_or_str(&config.level)?
        .log_to_file(target.file_spec())
        .format_for_files(detailed_format)
        .duplicate_to_stderr(Duplicate::Warn)
        .format_for_stderr(default_format)
        .rotate(
            Criterion::Size(config.rotate_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.rotate_keep),
        )
        .start()?;
    Ok(handle)
}
