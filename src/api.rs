//! The boundary with the persistence and insights service.
//!
//! [TransactionApi] is the contract the dashboard is written against and
//! [HttpApi] is its implementation over HTTP with JSON bodies:
//!
//! | Operation          | Request                          |
//! |--------------------|----------------------------------|
//! | List transactions  | `GET /api/transactions`          |
//! | Create transaction | `POST /api/transactions`         |
//! | Delete transaction | `DELETE /api/transactions/{id}`  |
//! | Fetch insights     | `GET /api/insights`              |
//!
//! Nothing here retries or times out. A failed request is reported once as
//! [Error::Transport].

use reqwest::{Client, Method, StatusCode, Url, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::{
    ClientConfig, Error,
    insights::InsightsSummary,
    logging::{log_request, log_response},
    transaction::{MutationResponse, NewTransaction, Transaction, TransactionId},
};

const TRANSACTIONS_PATH: &str = "api/transactions";
const INSIGHTS_PATH: &str = "api/insights";

/// The operations the dashboard needs from the persistence and insights service.
///
/// The futures are polled on a single thread, so implementations do not need
/// to be `Send`.
#[allow(async_fn_in_trait)]
pub trait TransactionApi {
    /// Get every transaction.
    ///
    /// # Errors
    /// Returns [Error::Transport] if the request fails or the body is not a
    /// list of transactions.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, Error>;

    /// Ask the server to create a transaction from the raw form `payload`.
    ///
    /// A rejected payload is not an error at this level: it is an `Ok`
    /// response with `ok` set to false.
    ///
    /// # Errors
    /// Returns [Error::Transport] if the request fails or the body cannot be parsed.
    async fn create_transaction(&self, payload: &NewTransaction)
    -> Result<MutationResponse, Error>;

    /// Ask the server to delete the transaction with `id`.
    ///
    /// # Errors
    /// Returns [Error::Transport] if the request fails or the body cannot be parsed.
    async fn delete_transaction(&self, id: TransactionId) -> Result<MutationResponse, Error>;

    /// Get the server-computed insights summary.
    ///
    /// # Errors
    /// Returns [Error::Transport] if the request fails or the body cannot be parsed.
    async fn fetch_insights(&self) -> Result<InsightsSummary, Error>;
}

/// A [TransactionApi] client for the service's HTTP interface.
#[derive(Debug, Clone)]
pub struct HttpApi {
    http: Client,
    api_base: Url,
}

impl HttpApi {
    /// Create a client for the service at `config.api_base()`.
    ///
    /// # Errors
    /// Returns [Error::Transport] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let http = Client::builder().build()?;

        Ok(Self {
            http,
            api_base: config.api_base().clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.api_base
            .join(path)
            .map_err(|_| Error::InvalidApiBase(self.api_base.to_string()))
    }

    /// Send a request and return the status code and body text, logging both.
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<String>,
    ) -> Result<(StatusCode, String), Error> {
        log_request(&method, &url, body.as_deref().unwrap_or(""));

        let mut request = self.http.request(method, url.clone());

        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        log_response(status, &url, &text);

        Ok((status, text))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.endpoint(path)?;
        let (status, text) = self.send(Method::GET, url.clone(), None).await?;

        if !status.is_success() {
            tracing::error!("GET {url} failed with status {status}");
            return Err(Error::Transport(format!("GET {url} returned {status}")));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// The create and delete endpoints answer failures with a JSON body too
    /// (e.g. 400 with `{"ok": false, "error": ...}`), so the status is not checked.
    async fn mutate(
        &self,
        method: Method,
        url: Url,
        body: Option<String>,
    ) -> Result<MutationResponse, Error> {
        let (_, text) = self.send(method, url, body).await?;

        Ok(serde_json::from_str(&text)?)
    }
}

impl TransactionApi for HttpApi {
    async fn list_transactions(&self) -> Result<Vec<Transaction>, Error> {
        self.get_json(TRANSACTIONS_PATH).await
    }

    async fn create_transaction(
        &self,
        payload: &NewTransaction,
    ) -> Result<MutationResponse, Error> {
        let url = self.endpoint(TRANSACTIONS_PATH)?;
        let body = serde_json::to_string(payload)?;

        self.mutate(Method::POST, url, Some(body)).await
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<MutationResponse, Error> {
        let url = self.endpoint(&format!("{TRANSACTIONS_PATH}/{id}"))?;

        self.mutate(Method::DELETE, url, None).await
    }

    async fn fetch_insights(&self) -> Result<InsightsSummary, Error> {
        self.get_json(INSIGHTS_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use crate::ClientConfig;

    use super::HttpApi;

    #[test]
    fn endpoints_are_joined_onto_base_path() {
        let config = ClientConfig::new("http://localhost:5000/budget").unwrap();
        let api = HttpApi::new(&config).unwrap();

        assert_eq!(
            api.endpoint("api/transactions/42").unwrap().as_str(),
            "http://localhost:5000/budget/api/transactions/42"
        );
    }
}
