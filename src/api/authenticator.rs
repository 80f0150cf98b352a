use reqwest::Method;

use crate::store::StoreResult;

use super::{
    client::InnerClient,
    models::{LoginRequest, LoginResponse},
};

/// Аутентификатор по email и паролю.
pub struct Authenticator {
    client: InnerClient,
}

impl Authenticator {
    pub fn new(base_url: &str) -> StoreResult<Self> {
        Ok(Self {
            client: InnerClient::new(base_url)?,
        })
    }

    /// Обменивает email и пароль на токен доступа.
    pub async fn login(&self, email: &str, password: &str) -> StoreResult<String> {
        const URL: &str = "/auth/login";

        let payload = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };

        let resp: LoginResponse = self
            .client
            .send_json(Method::POST, URL, &payload, None)
            .await?;

        Ok(resp.jwt)
    }
}
