use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use resolve_path::PathResolveExt;

#[derive(Serialize, Deserialize, Debug)]
pub struct Config {
    /// Адрес бэкенда.
    pub api_url: String,

    /// Путь до файла с локальным хранилищем.
    pub storage_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5678".to_owned(),
            storage_path: PathBuf::from("./storage.json"),
        }
    }
}

/// Загружает конфигурацию.
pub fn load(path: PathBuf) -> anyhow::Result<Config> {
    let mut cfg: Config = confy::load_path(path)?;

    normalize(&mut cfg)?;

    Ok(cfg)
}

pub fn normalize(cfg: &mut Config) -> anyhow::Result<()> {
    // Чтобы правильно обработать относительные пути.
    cfg.storage_path = cfg.storage_path.try_resolve()?.into_owned();
    cfg.api_url = cfg.api_url.trim_end_matches('/').to_owned();

    Ok(())
}
