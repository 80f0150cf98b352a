use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, error, info};

use crate::{
    model::{Amount, BillRecord, BillStatus, BillType, ReceiptFile, UploadedReceipt, DEFAULT_VAT_PCT},
    routes::{OnNavigate, Route},
    session::Session,
    store::{CreateBillRequest, Store, StoreError, UpdateBillRequest},
};

pub const INVALID_FORMAT_MESSAGE: &str = "Format de fichier invalide";
pub const NO_VALID_FILE_MESSAGE: &str = "Aucun fichier valide n'a été sélectionné";

/// Состояние формы.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Empty,
    FileRejected,
    Uploading,
    UploadFailed,
    Uploaded,
    Submitting,
    Submitted,
    SubmitFailed,
}

/// Значения полей формы в том виде, в котором их ввёл пользователь.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

/// Данные о чеке, накопленные до отправки формы.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    /// Идентификатор записи, которую создало хранилище при загрузке чека.
    pub bill_id: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
}

impl Draft {
    fn attach(&mut self, receipt: UploadedReceipt) {
        if let Some(remote) = receipt.remote {
            self.bill_id = Some(remote.key);
            self.file_url = Some(remote.file_url);
            self.file_name = Some(receipt.file.name);
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Форма создания нового расхода.
pub struct NewBill {
    store: Arc<dyn Store>,
    session: Session,
    on_navigate: OnNavigate,

    /// Запись, которую редактируем, если это не новый расход.
    editing: Option<BillRecord>,

    draft: Draft,
    file_input: Option<ReceiptFile>,
    file_error: Option<String>,
    submit_error: Option<String>,
    state: FormState,
}

impl NewBill {
    pub fn new(store: Arc<dyn Store>, session: Session, on_navigate: OnNavigate) -> Self {
        Self {
            store,
            session,
            on_navigate,
            editing: None,
            draft: Draft::default(),
            file_input: None,
            file_error: None,
            submit_error: None,
            state: FormState::Empty,
        }
    }

    /// Открывает форму на уже существующей записи.
    /// Её чек считается загруженным.
    pub fn edit(
        store: Arc<dyn Store>,
        session: Session,
        on_navigate: OnNavigate,
        bill: BillRecord,
    ) -> Self {
        let mut form = Self::new(store, session, on_navigate);

        form.draft = Draft {
            bill_id: Some(bill.id.clone()),
            file_url: bill.file_url.clone(),
            file_name: bill.file_name.clone(),
        };
        if form.has_receipt() {
            form.state = FormState::Uploaded;
        }
        form.editing = Some(bill);

        form
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Файл, выбранный в поле загрузки.
    pub fn file_input(&self) -> Option<&ReceiptFile> {
        self.file_input.as_ref()
    }

    pub fn file_error(&self) -> Option<&str> {
        self.file_error.as_deref()
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    fn has_receipt(&self) -> bool {
        self.draft.bill_id.is_some() && self.draft.file_url.is_some() && self.draft.file_name.is_some()
    }

    /// Обрабатывает выбор файла: проверяет формат и сразу загружает чек.
    pub async fn handle_change_file(&mut self, files: Vec<ReceiptFile>) -> Result<(), FormError> {
        let Some(file) = files.into_iter().next() else {
            debug!("Файл не выбран");
            return Ok(());
        };

        let mut receipt = UploadedReceipt::inspect(file);

        if !receipt.valid {
            debug!(
                "Файл {} с расширением \"{}\" отклонён",
                receipt.file.name, receipt.extension
            );
            self.file_error = Some(INVALID_FORMAT_MESSAGE.to_owned());
            self.file_input = None;
            if self.editing.is_none() {
                self.draft.clear();
            }
            self.state = FormState::FileRejected;
            return Err(FormError::InvalidFormat);
        }

        self.file_error = None;
        self.file_input = Some(receipt.file.clone());
        if self.editing.is_none() {
            self.draft.clear();
        }
        self.state = FormState::Uploading;

        let request = CreateBillRequest {
            file: receipt.file.clone(),
            email: self.session.email.clone(),
        };

        match self.store.create(request).await {
            Ok(remote) => {
                debug!("Чек {} загружен: {}", receipt.file.name, remote.file_url);
                receipt.remote = Some(remote);
                self.draft.attach(receipt);
                if let Some(bill) = &self.editing {
                    self.draft.bill_id = Some(bill.id.clone());
                }
                self.state = FormState::Uploaded;
                Ok(())
            }
            Err(e) => {
                error!("Не удалось загрузить чек {}: {}", receipt.file.name, e);
                self.state = FormState::UploadFailed;
                Err(FormError::Upload(e))
            }
        }
    }

    /// Отправляет форму.
    pub async fn handle_submit(&mut self, values: &FormValues) -> Result<(), FormError> {
        if self.state == FormState::FileRejected || !self.has_receipt() {
            self.submit_error = Some(NO_VALID_FILE_MESSAGE.to_owned());
            return Err(FormError::NoValidFile);
        }

        let bill = match self.build_bill(values) {
            Ok(bill) => bill,
            Err(e) => {
                self.submit_error = Some(e.to_string());
                return Err(e);
            }
        };
        self.submit_error = None;

        let request = UpdateBillRequest {
            selector: bill.id.clone(),
            bill,
        };

        self.state = FormState::Submitting;

        match self.store.update(request).await {
            Ok(saved) => {
                info!("Расход {} сохранён", saved.id);
                self.state = FormState::Submitted;
                (self.on_navigate)(Route::Bills);
                Ok(())
            }
            Err(e) => {
                error!("Не удалось сохранить расход: {}", e);
                self.state = FormState::SubmitFailed;
                Err(FormError::Submit(e))
            }
        }
    }

    /// Собирает запись из значений формы и данных о загруженном чеке.
    fn build_bill(&self, values: &FormValues) -> Result<BillRecord, FormError> {
        let bill_type: BillType = values
            .expense_type
            .parse()
            .map_err(|e| FormError::invalid("expense-type", e))?;

        let date = values.date.trim();
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| FormError::invalid("datepicker", e))?;

        if values.amount.trim().is_empty() {
            return Err(FormError::invalid("amount", "required"));
        }
        let amount: Amount = values.amount.parse().map_err(|e| FormError::invalid("amount", e))?;
        let vat: Amount = values.vat.parse().map_err(|e| FormError::invalid("vat", e))?;

        let pct = match values.pct.trim() {
            "" => DEFAULT_VAT_PCT,
            s => s.parse().map_err(|e| FormError::invalid("pct", e))?,
        };

        Ok(BillRecord {
            id: self.draft.bill_id.clone().unwrap_or_default(),
            bill_type,
            name: values.name.trim().to_owned(),
            amount,
            date: date.to_owned(),
            vat,
            pct,
            status: BillStatus::Pending,
            commentary: values.commentary.trim().to_owned(),
            comment_admin: self.editing.as_ref().and_then(|b| b.comment_admin.clone()),
            file_url: self.draft.file_url.clone(),
            file_name: self.draft.file_name.clone(),
            email: self.session.email.clone(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("{}", INVALID_FORMAT_MESSAGE)]
    InvalidFormat,

    #[error("{}", NO_VALID_FILE_MESSAGE)]
    NoValidFile,

    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("upload receipt")]
    Upload(#[source] StoreError),

    #[error("submit bill")]
    Submit(#[source] StoreError),
}

impl FormError {
    fn invalid(field: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidField {
            field,
            reason: reason.to_string(),
        }
    }
}
