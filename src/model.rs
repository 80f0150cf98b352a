use std::{path::Path, str::FromStr};

use crate::newtype;
use anyhow::anyhow;
use enum_iterator::all;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Расширения файлов, которые принимаются в качестве чека.
pub const ALLOWED_RECEIPT_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Процент НДС по умолчанию.
pub const DEFAULT_VAT_PCT: u32 = 20;

/// Note de frais.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    #[serde(default)]
    pub id: String,

    /// Категория расхода.
    #[serde(rename = "type")]
    pub bill_type: BillType,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub amount: Amount,

    /// Дата расхода в формате ISO (`YYYY-MM-DD`).
    /// Не проверяется при чтении, так как в хранилище могут оказаться битые данные.
    #[serde(default)]
    pub date: String,

    /// Сумма НДС.
    #[serde(default)]
    pub vat: Amount,

    /// Процент НДС.
    #[serde(default = "default_pct")]
    pub pct: u32,

    #[serde(default)]
    pub status: BillStatus,

    /// Комментарий сотрудника.
    #[serde(default)]
    pub commentary: String,

    /// Комментарий администратора.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,

    #[serde(default)]
    pub file_url: Option<String>,

    #[serde(default)]
    pub file_name: Option<String>,

    #[serde(default)]
    pub email: Option<Email>,
}

fn default_pct() -> u32 {
    DEFAULT_VAT_PCT
}

/// Категории расходов.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    enum_iterator::Sequence,
)]
pub enum BillType {
    #[serde(rename = "Transports")]
    #[display(fmt = "Transports")]
    Transports,

    #[serde(rename = "Restaurants et bars")]
    #[display(fmt = "Restaurants et bars")]
    Restaurants,

    #[serde(rename = "Hôtel et logement")]
    #[display(fmt = "Hôtel et logement")]
    Hotel,

    #[serde(rename = "Services en ligne")]
    #[display(fmt = "Services en ligne")]
    OnlineServices,

    #[serde(rename = "IT et électronique")]
    #[display(fmt = "IT et électronique")]
    Electronics,

    #[serde(rename = "Equipement et matériel")]
    #[display(fmt = "Equipement et matériel")]
    Equipment,

    #[serde(rename = "Fournitures de bureau")]
    #[display(fmt = "Fournitures de bureau")]
    OfficeSupplies,
}

impl FromStr for BillType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        all::<BillType>()
            .find(|t| t.to_string() == s)
            .ok_or(anyhow!("unknown expense type \"{}\"", s))
    }
}

/// Статус рассмотрения расхода администратором.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

/// Роль пользователя.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserType {
    #[default]
    Employee,
    Admin,
}

newtype!(Email, String, "String", email_validate);

fn email_validate(value: &str) -> anyhow::Result<()> {
    let re = Regex::new(r"^[^@\s]+@[^@\s]+$")?;
    if !re.is_match(value) {
        return Err(anyhow!("\"{}\" is not an email", value));
    }

    Ok(())
}

newtype!(Amount, f64, "Numeric", amount_validate);

fn amount_validate(value: &f64) -> anyhow::Result<()> {
    if !value.is_finite() {
        return Err(anyhow!("should be a number"));
    }

    if *value < 0.0 {
        return Err(anyhow!("shouldn't be negative"));
    }

    Ok(())
}

/// Число в том виде, в котором его отдаёт бэкенд: иногда это строка.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl TryFrom<Numeric> for Amount {
    type Error = anyhow::Error;

    fn try_from(value: Numeric) -> Result<Self, Self::Error> {
        match value {
            Numeric::Number(n) => Amount::new(n),
            Numeric::Text(s) => s.parse(),
        }
    }
}

impl FromStr for Amount {
    type Err = anyhow::Error;

    /// Пустая строка считается нулём, как пустое поле формы.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Amount::default());
        }

        Amount::new(s.replace(',', ".").parse::<f64>()?)
    }
}

/// Файл, выбранный пользователем в поле загрузки чека.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptFile {
    /// Исходное имя файла.
    pub name: String,

    pub content: Vec<u8>,
}

impl ReceiptFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// Загружает файл с диска.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self { name, content })
    }

    /// Расширение файла в нижнем регистре.
    pub fn extension(&self) -> String {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }
}

/// Ссылка на загруженный в хранилище файл.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRef {
    pub file_url: String,

    /// Идентификатор созданной записи.
    pub key: String,
}

/// Чек в процессе загрузки.
#[derive(Debug, Clone)]
pub struct UploadedReceipt {
    pub file: ReceiptFile,
    pub extension: String,
    pub valid: bool,
    pub remote: Option<RemoteRef>,
}

impl UploadedReceipt {
    /// Проверяет выбранный файл.
    pub fn inspect(file: ReceiptFile) -> Self {
        let extension = file.extension();
        let valid = ALLOWED_RECEIPT_EXTENSIONS.contains(&extension.as_str());

        Self {
            file,
            extension,
            valid,
            remote: None,
        }
    }
}
