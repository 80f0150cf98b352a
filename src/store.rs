use async_trait::async_trait;

use crate::model::{BillRecord, Email, ReceiptFile, RemoteRef};

/// Удалённое хранилище расходов.
#[async_trait]
pub trait Store: Send + Sync {
    /// Возвращает все расходы текущего пользователя.
    async fn list(&self) -> StoreResult<Vec<BillRecord>>;

    /// Загружает чек и создаёт под него запись.
    async fn create(&self, request: CreateBillRequest) -> StoreResult<RemoteRef>;

    /// Перезаписывает запись с идентификатором `request.selector`.
    async fn update(&self, request: UpdateBillRequest) -> StoreResult<BillRecord>;
}

#[derive(Debug, Clone)]
pub struct CreateBillRequest {
    pub file: ReceiptFile,
    pub email: Option<Email>,
}

#[derive(Debug, Clone)]
pub struct UpdateBillRequest {
    pub selector: String,
    pub bill: BillRecord,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Erreur {0}")]
    Status(u16),

    #[error("{0}")]
    Message(String),

    #[error("Erreur réseau: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Erreur de lecture: {0}")]
    Deserialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message() {
        assert_eq!(StoreError::Status(404).to_string(), "Erreur 404");
    }

    #[test]
    fn deserialize_error_message_keeps_source() {
        let e = serde_json::from_str::<Vec<BillRecord>>("[{").unwrap_err();
        let source = e.to_string();

        let message = StoreError::from(e).to_string();

        assert!(message.starts_with("Erreur de lecture: "));
        assert!(message.contains(&source));
    }
}
