use anyhow::{anyhow, Result};
use directories::{BaseDirs, ProjectDirs};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration, merged from TOML files and `MENTION_*` environment
/// variables. GitHub credentials deliberately stay out of here: the
/// fallback loop snapshots the raw environment at request time instead.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    /// Mention server origin used by server-mode fetches and the
    /// snapshot generator.
    pub base_url: Option<String>,
    /// Bind address for `mention serve`.
    pub bind: Option<String>,
    /// View template directory for the snapshot generator.
    pub views_dir: Option<PathBuf>,
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let explicit_path = config_path.as_deref();
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        for path in config_paths(explicit_path) {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed("MENTION_"));

        figment
            .extract()
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }
}

fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
        return paths;
    }

    if let Some(path) = get_project_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_xdg_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_local_config_path() {
        push_unique(&mut paths, path);
    }

    paths
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mention").map(|d| d.config_dir().join("config.toml"))
}

fn get_xdg_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("mention").join("config.toml"));
    }

    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("mention")
            .join("config.toml")
    })
}

fn get_local_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join(".mention.toml"))
}
