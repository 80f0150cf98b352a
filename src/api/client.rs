use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{
    multipart::{Form, Part},
    Method, RequestBuilder,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    model::{BillRecord, RemoteRef},
    store::{CreateBillRequest, Store, StoreError, StoreResult, UpdateBillRequest},
};

use super::models::CreateBillResponse;

/// Внутренний клиент.
pub(super) struct InnerClient {
    client: reqwest::Client,
    base_url: String,
}

impl InnerClient {
    /// Создаёт новый инстанс внутреннего клиента.
    pub(super) fn new(base_url: &str) -> StoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(5))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub(super) async fn get<R: DeserializeOwned>(
        &self,
        api_method: &str,
        jwt: Option<&str>,
    ) -> StoreResult<R> {
        let req = self.client.request(Method::GET, self.build_url(api_method));
        self.send(req, jwt).await
    }

    pub(super) async fn send_json<B: Serialize, R: DeserializeOwned>(
        &self,
        http_method: Method,
        api_method: &str,
        payload: &B,
        jwt: Option<&str>,
    ) -> StoreResult<R> {
        let req = self
            .client
            .request(http_method, self.build_url(api_method))
            .json(payload);
        self.send(req, jwt).await
    }

    pub(super) async fn send_form<R: DeserializeOwned>(
        &self,
        api_method: &str,
        form: Form,
        jwt: Option<&str>,
    ) -> StoreResult<R> {
        let req = self
            .client
            .request(Method::POST, self.build_url(api_method))
            .multipart(form);
        self.send(req, jwt).await
    }

    async fn send<R: DeserializeOwned>(
        &self,
        mut req: RequestBuilder,
        jwt: Option<&str>,
    ) -> StoreResult<R> {
        if let Some(t) = jwt {
            req = req.bearer_auth(t);
        }

        let resp = req.send().await?;
        let url = resp.url().clone();
        let status = resp.status();

        debug!("Ответ АПИ на {}: {}", url, status);

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            debug!("Тело ошибки на {}: {}", url, text);
            return Err(StoreError::Status(status.as_u16()));
        }

        let body = resp.text().await?;

        debug!("Тело ответа на {}: {}", url, body);

        let data = serde_json::from_str(&body)?;

        Ok(data)
    }

    fn build_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method.trim_start_matches('/'))
    }
}

/// Хранилище расходов поверх REST АПИ бэкенда.
pub struct HttpStore {
    client: InnerClient,
    jwt: Option<String>,
}

impl HttpStore {
    pub fn new(base_url: &str, jwt: Option<String>) -> StoreResult<Self> {
        Ok(Self {
            client: InnerClient::new(base_url)?,
            jwt,
        })
    }
}

#[async_trait]
impl Store for HttpStore {
    async fn list(&self) -> StoreResult<Vec<BillRecord>> {
        self.client.get("/bills", self.jwt.as_deref()).await
    }

    async fn create(&self, request: CreateBillRequest) -> StoreResult<RemoteRef> {
        let mut form = Form::new().part(
            "file",
            Part::bytes(request.file.content).file_name(request.file.name),
        );

        if let Some(email) = request.email {
            form = form.text("email", String::from(email));
        }

        let resp: CreateBillResponse = self
            .client
            .send_form("/bills", form, self.jwt.as_deref())
            .await?;

        Ok(RemoteRef {
            file_url: resp.file_url,
            key: resp.key,
        })
    }

    async fn update(&self, request: UpdateBillRequest) -> StoreResult<BillRecord> {
        let api_method = format!("/bills/{}", request.selector);

        self.client
            .send_json(Method::PATCH, &api_method, &request.bill, self.jwt.as_deref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_paths() {
        let client = InnerClient::new("http://localhost:5678/").unwrap();

        assert_eq!(client.build_url("/bills"), "http://localhost:5678/bills");
        assert_eq!(client.build_url("bills/1"), "http://localhost:5678/bills/1");
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        let store = HttpStore::new("http://127.0.0.1:1", None).unwrap();

        assert!(matches!(store.list().await, Err(StoreError::Transport(_))));
    }

    #[test]
    fn create_response_is_camel_case() {
        let resp: CreateBillResponse =
            serde_json::from_str(r#"{"fileUrl": "https://localhost:3456/images/test.jpg", "key": "1234"}"#)
                .unwrap();

        assert_eq!(resp.file_url, "https://localhost:3456/images/test.jpg");
        assert_eq!(resp.key, "1234");
    }
}
