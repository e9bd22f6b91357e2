use directories::ProjectDirs;
use std::path::PathBuf;

const LOG_DIR_ENV: &str = "HOSTKEY_GUARD_LOG_DIR";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "hostkey-guard", "hostkey-guard")
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Get the path to the settings file
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the path to the application's own known_hosts file
pub fn known_hosts_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("known_hosts"))
}

/// Get the path to the user's SSH known_hosts file
pub fn ssh_known_hosts_file() -> Option<PathBuf> {
    ssh_dir().map(|dir| dir.join("known_hosts"))
}

/// Default known_hosts locations, without duplicates
pub fn default_known_hosts_files() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for path in [known_hosts_file(), ssh_known_hosts_file()]
        .into_iter()
        .flatten()
    {
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

/// Expand tilde in path (e.g., ~/.ssh/known_hosts -> /home/user/.ssh/known_hosts)
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    // Try directories crate first, fall back to HOME env var
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .or_else(|| std::env::var("HOME").ok().map(PathBuf::from))
}

/// Get the default SSH directory
pub fn ssh_dir() -> Option<PathBuf> {
    dirs_home().map(|home| home.join(".ssh"))
}

/// Get the log directory path
pub fn log_dir() -> Option<PathBuf> {
    if let Ok(raw) = std::env::var(LOG_DIR_ENV) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        return Some(PathBuf::from(trimmed));
    }

    config_dir().map(|d| d.join("logs"))
}

/// Ensure the log directory exists with proper permissions
pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine log directory",
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o700))?;
        }
    }

    Ok(dir)
}
