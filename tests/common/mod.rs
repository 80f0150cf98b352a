#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::{Level, LevelFilter, Log, Metadata, Record};
use billed::{
    bills::ReceiptModal,
    model::{BillRecord, Email, RemoteRef, UserType},
    routes::{OnNavigate, Route},
    session::Session,
    store::{CreateBillRequest, Store, StoreError, StoreResult, UpdateBillRequest},
};

pub const UPLOADED_URL: &str = "https://localhost:3456/images/test.jpg";
pub const UPLOADED_KEY: &str = "1234";

const BILLS: &str = r#"[
  {
    "id": "47qAXb6fIm2zOKkLzMro",
    "vat": "80",
    "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a…f-1.jpg?alt=media&token=c1640e12-a24b-4b11-ae52-529112e9602a",
    "status": "pending",
    "type": "Hôtel et logement",
    "commentary": "séminaire billed",
    "name": "encore",
    "fileName": "preview-facture-free-201801-pdf-1.jpg",
    "date": "2004-04-04",
    "amount": 400,
    "commentAdmin": "ok",
    "email": "a@a",
    "pct": 20
  },
  {
    "id": "BeKy5Mo4jkmdfPGYpTxZ",
    "vat": "",
    "amount": 100,
    "name": "test1",
    "fileName": "1592770761.jpeg",
    "commentary": "plop",
    "pct": 20,
    "type": "Transports",
    "email": "a@a",
    "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a…61.jpeg?alt=media&token=7685cd61-c112-42bc-9929-8a799bb82d8b",
    "date": "2001-01-01",
    "status": "refused",
    "commentAdmin": "en fait non"
  },
  {
    "id": "UIUZtnPQvnbFnB0ozvJh",
    "name": "test3",
    "email": "a@a",
    "type": "Services en ligne",
    "vat": "60",
    "pct": 20,
    "commentAdmin": "bon bah d'accord",
    "amount": 300,
    "status": "accepted",
    "date": "2003-03-03",
    "commentary": "",
    "fileName": "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
    "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a…dur.png?alt=media&token=571d34cb-9c8f-430a-af52-66221cae1da3"
  },
  {
    "id": "qcCK3SzECmaZAGRrHjaC",
    "name": "test2",
    "email": "a@a",
    "type": "Restaurants et bars",
    "vat": "40",
    "pct": 20,
    "commentAdmin": "pas la bonne facture",
    "amount": 200,
    "status": "refused",
    "date": "2002-02-02",
    "commentary": "test2",
    "fileName": "preview-facture-free-201801-pdf-1.jpg",
    "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a…f-1.jpg?alt=media&token=4df6ed2c-12c8-42a2-b013-346c1346f732"
  }
]"#;

pub fn bills_fixture() -> Vec<BillRecord> {
    serde_json::from_str(BILLS).unwrap()
}

/// Хранилище в памяти, которое запоминает все вызовы.
pub struct MockStore {
    bills: Vec<BillRecord>,
    list_error: Mutex<Option<String>>,
    create_error: Mutex<Option<String>>,
    update_error: Mutex<Option<String>>,
    pub created: Mutex<Vec<CreateBillRequest>>,
    pub updated: Mutex<Vec<UpdateBillRequest>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::with_bills(bills_fixture())
    }

    pub fn with_bills(bills: Vec<BillRecord>) -> Self {
        Self {
            bills,
            list_error: Mutex::new(None),
            create_error: Mutex::new(None),
            update_error: Mutex::new(None),
            created: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_list(self, message: &str) -> Self {
        *self.list_error.lock().unwrap() = Some(message.into());
        self
    }

    pub fn set_create_error(&self, message: Option<&str>) {
        *self.create_error.lock().unwrap() = message.map(Into::into);
    }

    pub fn set_update_error(&self, message: Option<&str>) {
        *self.update_error.lock().unwrap() = message.map(Into::into);
    }

    pub fn create_calls(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn update_calls(&self) -> usize {
        self.updated.lock().unwrap().len()
    }
}

#[async_trait]
impl Store for MockStore {
    async fn list(&self) -> StoreResult<Vec<BillRecord>> {
        match self.list_error.lock().unwrap().clone() {
            Some(message) => Err(StoreError::Message(message)),
            None => Ok(self.bills.clone()),
        }
    }

    async fn create(&self, request: CreateBillRequest) -> StoreResult<RemoteRef> {
        self.created.lock().unwrap().push(request);

        match self.create_error.lock().unwrap().clone() {
            Some(message) => Err(StoreError::Message(message)),
            None => Ok(RemoteRef {
                file_url: UPLOADED_URL.into(),
                key: UPLOADED_KEY.into(),
            }),
        }
    }

    async fn update(&self, request: UpdateBillRequest) -> StoreResult<BillRecord> {
        self.updated.lock().unwrap().push(request.clone());

        match self.update_error.lock().unwrap().clone() {
            Some(message) => Err(StoreError::Message(message)),
            None => Ok(request.bill),
        }
    }
}

/// Модальное окно, которое запоминает показанные чеки.
#[derive(Clone, Default)]
pub struct RecordingModal {
    pub shown: Arc<Mutex<Vec<String>>>,
}

impl ReceiptModal for RecordingModal {
    fn show(&self, receipt_url: &str) {
        self.shown.lock().unwrap().push(receipt_url.to_owned());
    }
}

/// Навигация, которая запоминает все переходы.
pub fn recording_navigation() -> (OnNavigate, Arc<Mutex<Vec<Route>>>) {
    let routes = Arc::new(Mutex::new(Vec::new()));
    let recorded = routes.clone();

    let on_navigate: OnNavigate = Box::new(move |route| recorded.lock().unwrap().push(route));

    (on_navigate, routes)
}

pub fn employee() -> Session {
    Session {
        user_type: UserType::Employee,
        email: Some(Email::new("a@a").unwrap()),
    }
}

/// Логгер, который складывает все записи в память.
struct CapturingLogger;

static LOGGER: CapturingLogger = CapturingLogger;
static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

impl Log for CapturingLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

/// Включает перехват логов. Логгер ставится один раз на весь тестовый бинарник.
pub fn capture_logs() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
}

/// Сообщения с указанным уровнем, записанные с момента включения перехвата.
pub fn logged(level: Level) -> Vec<String> {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(l, _)| *l == level)
        .map(|(_, message)| message.clone())
        .collect()
}
