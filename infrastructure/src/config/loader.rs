//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "sales-dataverse";
const PROJECT_FILES: [&str; 2] = ["sales-dataverse.toml", ".sales-dataverse.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `DATAVERSE_URL`, `SALES_DATAVERSE_<SECTION>__<KEY>`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./sales-dataverse.toml` or `./.sales-dataverse.toml`
    /// 4. Global config: `$XDG_CONFIG_HOME/sales-dataverse/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    ///
    /// Environment overrides still apply so a bare `DATAVERSE_URL` works.
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(None, None, None).extract().map_err(Box::new)
    }

    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global
            && path.exists()
        {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(
                Env::raw()
                    .only(&["DATAVERSE_URL"])
                    .map(|_| "dataverse.url".into()),
            )
            .merge(Env::prefixed("SALES_DATAVERSE_").split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/sales-dataverse/config.toml if set,
    /// otherwise falls back to ~/.config/sales-dataverse/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Config file locations, in priority order, with whether each was found.
    pub fn config_sources() -> Vec<(String, String, bool)> {
        let mut sources = Vec::new();

        match Self::project_config_path() {
            Some(path) => sources.push(("Project".to_string(), path.display().to_string(), true)),
            None => sources.push((
                "Project".to_string(),
                format!("./{} or ./{}", PROJECT_FILES[0], PROJECT_FILES[1]),
                false,
            )),
        }

        if let Some(path) = Self::global_config_path() {
            let exists = path.exists();
            sources.push(("Global".to_string(), path.display().to_string(), exists));
        }

        sources
    }
}
