use std::{collections::HashMap, fs, io, path::Path};

use serde::{Deserialize, Serialize};

use crate::model::{Email, UserType};

/// Ключ, под которым хранится текущий пользователь.
pub const USER_KEY: &str = "user";

/// Ключ, под которым хранится токен доступа к АПИ.
pub const JWT_KEY: &str = "jwt";

/// Локальное key-value хранилище.
/// Хранит данные которые нужны между разными запусками приложения.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(transparent)]
pub struct LocalStorage {
    items: HashMap<String, String>,
}

impl LocalStorage {
    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: &str, value: String) {
        self.items.insert(key.to_owned(), value);
    }
}

/// Текущий пользователь.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Session {
    #[serde(rename = "type")]
    pub user_type: UserType,

    #[serde(default)]
    pub email: Option<Email>,
}

impl Session {
    /// Читает пользователя из хранилища.
    pub fn from_storage(storage: &LocalStorage) -> LoadResult<Option<Self>> {
        storage
            .get_item(USER_KEY)
            .map(serde_json::from_str::<Self>)
            .transpose()
            .map_err(LoadError::from)
    }

    /// Записывает пользователя в хранилище.
    pub fn store(&self, storage: &mut LocalStorage) -> SaveResult {
        storage.set_item(USER_KEY, serde_json::to_string(self)?);
        Ok(())
    }
}

/// Загружает хранилище из указанного файла.
pub fn load(path: &Path) -> LoadResult<LocalStorage> {
    if !path.exists() {
        return Ok(LocalStorage::default());
    }

    let path = path.canonicalize()?;

    let content = fs::read_to_string(path)?;

    let storage: LocalStorage = serde_json::from_str(&content)?;

    Ok(storage)
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("read storage file")]
    ReadFile(#[from] io::Error),

    #[error("deserialize")]
    Deserialize(#[from] serde_json::Error),
}

/// Сохраняет хранилище в указанный файл.
pub fn save(storage: &LocalStorage, path: &Path) -> SaveResult {
    let content = serde_json::to_string(storage)?;

    fs::create_dir_all(path.parent().unwrap_or(Path::new("")))?;

    fs::write(path, content)?;

    Ok(())
}

pub type SaveResult = std::result::Result<(), SaveError>;

#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    #[error("write storage file")]
    WriteFile(#[from] io::Error),

    #[error("serialize")]
    Serialize(#[from] serde_json::Error),
}
