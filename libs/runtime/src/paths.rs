//! Home directory resolution for the server's on-disk state.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the server home directory.
///
/// - `None` → `<user home>/<default_subdir>`
/// - `~` or `~/x` → expanded against the user home
/// - relative paths → joined onto the current working directory
///
/// When `create` is set the directory is created if missing.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let resolved = match configured {
        None => user_home()?.join(default_subdir),
        Some(raw) => expand(raw.trim())?,
    };

    let absolute = if resolved.is_absolute() {
        resolved
    } else {
        std::env::current_dir()
            .context("cannot read current directory")?
            .join(resolved)
    };

    if create {
        std::fs::create_dir_all(&absolute)
            .with_context(|| format!("cannot create home_dir {}", absolute.display()))?;
    }
    Ok(absolute)
}

fn expand(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return user_home();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(user_home()?.join(rest));
    }
    Ok(Path::new(raw).to_path_buf())
}

fn user_home() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow!("user home directory is not available"))
}
