use std::sync::Arc;

use log::{debug, error, warn};

use crate::{
    format::{format_date, format_status},
    model::{Amount, BillRecord, BillType},
    routes::{OnNavigate, Route},
    store::Store,
};

/// Механизм показа модального окна с чеком.
pub trait ReceiptModal: Send + Sync {
    fn show(&self, receipt_url: &str);
}

/// Строка таблицы расходов, готовая к отображению.
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    pub id: String,
    pub bill_type: BillType,
    pub name: String,

    /// Отформатированная дата, либо исходная, если отформатировать не удалось.
    pub date: String,

    /// Исходная ISO дата, по ней идёт сортировка.
    pub raw_date: String,

    pub amount: Amount,
    pub status: &'static str,
    pub file_url: Option<String>,
}

impl BillRow {
    fn from_record(bill: BillRecord) -> Self {
        let date = match format_date(&bill.date) {
            Ok(d) => d,
            Err(e) => {
                // Оставляем дату как есть.
                warn!("{} for {:?}", e, bill);
                bill.date.clone()
            }
        };

        Self {
            id: bill.id,
            bill_type: bill.bill_type,
            name: bill.name,
            date,
            raw_date: bill.date,
            amount: bill.amount,
            status: format_status(bill.status),
            file_url: bill.file_url,
        }
    }
}

/// Результат загрузки страницы со списком расходов.
#[derive(Debug, Clone, PartialEq)]
pub enum BillsView {
    Table { rows: Vec<BillRow> },
    Error(String),
}

impl BillsView {
    pub fn row_count(&self) -> usize {
        match self {
            BillsView::Table { rows } => rows.len(),
            BillsView::Error(_) => 0,
        }
    }
}

/// Сортирует строки от самой свежей к самой старой.
/// Сортировка стабильная: строки с одинаковой датой сохраняют исходный порядок.
pub fn sort_by_date_desc(rows: &mut [BillRow]) {
    rows.sort_by(|a, b| b.raw_date.cmp(&a.raw_date));
}

/// Страница со списком расходов сотрудника.
pub struct Bills {
    store: Arc<dyn Store>,
    on_navigate: OnNavigate,
    modal: Box<dyn ReceiptModal>,
}

impl Bills {
    pub fn new(store: Arc<dyn Store>, on_navigate: OnNavigate, modal: Box<dyn ReceiptModal>) -> Self {
        Self {
            store,
            on_navigate,
            modal,
        }
    }

    /// Загружает расходы и готовит их к отображению.
    pub async fn fetch_and_render(&self) -> BillsView {
        let bills = match self.store.list().await {
            Ok(bills) => bills,
            Err(e) => {
                error!("Не удалось загрузить список расходов: {}", e);
                return BillsView::Error(e.to_string());
            }
        };

        debug!("Получено {} расходов", bills.len());

        let mut rows: Vec<BillRow> = bills.into_iter().map(BillRow::from_record).collect();
        sort_by_date_desc(&mut rows);

        BillsView::Table { rows }
    }

    pub fn handle_click_new_bill(&self) {
        (self.on_navigate)(Route::NewBill);
    }

    pub fn handle_click_icon_eye(&self, receipt_url: &str) {
        debug!("Показываем чек {}", receipt_url);
        self.modal.show(receipt_url);
    }
}
