use std::fmt;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::auth;
use crate::config::CosmosConfig;
use crate::error::StorageError;

const HEADER_DATE: &str = "x-ms-date";
const HEADER_VERSION: &str = "x-ms-version";
const HEADER_PARTITION_KEY: &str = "x-ms-documentdb-partitionkey";
const HEADER_IS_QUERY: &str = "x-ms-documentdb-isquery";
const HEADER_CROSS_PARTITION: &str = "x-ms-documentdb-query-enablecrosspartition";
const HEADER_CONTINUATION: &str = "x-ms-continuation";

/// Handle to one Cosmos DB container.
///
/// Construction does no network I/O. The container's partition-key path is
/// read on first insert and cached for the life of the handle.
pub struct ContainerClient {
    http: reqwest::Client,
    endpoint: String,
    key: Vec<u8>,
    link: String,
    partition_key_path: OnceCell<Option<String>>,
}

impl fmt::Debug for ContainerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerClient")
            .field("endpoint", &self.endpoint)
            .field("link", &self.link)
            .field("partition_key_path", &self.partition_key_path.get())
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct ContainerProperties {
    #[serde(rename = "partitionKey")]
    partition_key: Option<PartitionKeyDefinition>,
}

#[derive(Deserialize)]
struct PartitionKeyDefinition {
    #[serde(default)]
    paths: Vec<String>,
}

#[derive(Serialize)]
struct QueryBody<'a> {
    query: &'a str,
    parameters: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct QueryPage<T> {
    #[serde(rename = "Documents")]
    documents: Vec<T>,
}

#[derive(Deserialize)]
struct ServiceErrorBody {
    code: Option<String>,
    message: Option<String>,
}

impl ContainerClient {
    pub fn new(config: &CosmosConfig) -> Result<Self, StorageError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("textlens/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http_client(http, config))
    }

    pub fn with_http_client(http: reqwest::Client, config: &CosmosConfig) -> Self {
        Self {
            http,
            endpoint: config.connection.endpoint.clone(),
            key: config.connection.key.clone(),
            link: config.container_link(),
            partition_key_path: OnceCell::new(),
        }
    }

    /// The container's partition-key path (e.g. `/id`), or `None` for a
    /// container created without one.
    pub async fn partition_key_path(&self) -> Result<Option<&str>, StorageError> {
        let path = self
            .partition_key_path
            .get_or_try_init(|| self.read_partition_key_path())
            .await?;
        Ok(path.as_deref())
    }

    async fn read_partition_key_path(&self) -> Result<Option<String>, StorageError> {
        let url = format!("{}/{}", self.endpoint, self.link);
        let resp = self.request(Method::GET, "colls", &url)?.send().await?;
        let body = check(resp).await?.bytes().await?;
        let props: ContainerProperties = serde_json::from_slice(&body)?;

        let path = props
            .partition_key
            .and_then(|pk| pk.paths.into_iter().next());
        tracing::debug!(container = %self.link, partition_key = ?path, "read container definition");
        Ok(path)
    }

    /// Create a document. Fails if a document with the same id already exists.
    pub async fn create_item<T: Serialize>(&self, item: &T) -> Result<(), StorageError> {
        let body = serde_json::to_value(item)?;
        let partition_key = self
            .partition_key_path()
            .await?
            .map(|path| partition_key_header(&body, path))
            .transpose()?;

        let url = format!("{}/{}/docs", self.endpoint, self.link);
        let mut req = self
            .request(Method::POST, "docs", &url)?
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(&body)?);
        if let Some(pk) = partition_key {
            req = req.header(HEADER_PARTITION_KEY, pk);
        }

        check(req.send().await?).await?;
        tracing::debug!(container = %self.link, "created document");
        Ok(())
    }

    /// Run a read-only query across all partitions, following continuation
    /// tokens until the result set is exhausted.
    pub async fn query_items<T: DeserializeOwned>(&self, query: &str) -> Result<Vec<T>, StorageError> {
        let url = format!("{}/{}/docs", self.endpoint, self.link);
        let body = serde_json::to_vec(&QueryBody {
            query,
            parameters: Vec::new(),
        })?;

        let mut items = Vec::new();
        let mut continuation: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut req = self
                .request(Method::POST, "docs", &url)?
                .header(CONTENT_TYPE, "application/query+json")
                .header(HEADER_IS_QUERY, "True")
                .header(HEADER_CROSS_PARTITION, "True")
                .body(body.clone());
            if let Some(token) = &continuation {
                req = req.header(HEADER_CONTINUATION, token);
            }

            let resp = check(req.send().await?).await?;
            let next = resp
                .headers()
                .get(HEADER_CONTINUATION)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string());
            let page: QueryPage<T> = serde_json::from_slice(&resp.bytes().await?)?;
            items.extend(page.documents);
            pages += 1;

            match next {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        tracing::debug!(container = %self.link, pages, items = items.len(), "query complete");
        Ok(items)
    }

    /// Start a signed request. Every resource this client touches signs with
    /// the container link.
    fn request(&self, method: Method, resource_type: &str, url: &str) -> Result<RequestBuilder, StorageError> {
        let date = auth::http_date(jiff::Timestamp::now());
        let token = auth::authorization_token(
            &self.key,
            method.as_str(),
            resource_type,
            &self.link,
            &date,
        )?;

        Ok(self
            .http
            .request(method, url)
            .header(HEADER_DATE, date)
            .header(HEADER_VERSION, auth::API_VERSION)
            .header(reqwest::header::AUTHORIZATION, token))
    }
}

/// JSON array holding the value found at `path` in `document`, as expected by
/// the partition-key header. A missing value becomes `[{}]`.
pub fn partition_key_header(document: &serde_json::Value, path: &str) -> Result<String, StorageError> {
    let value = document
        .pointer(path)
        .cloned()
        .unwrap_or_else(|| serde_json::Value::Object(Default::default()));
    Ok(serde_json::to_string(&[value])?)
}

async fn check(resp: Response) -> Result<Response, StorageError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ServiceErrorBody>(&text) {
        Ok(ServiceErrorBody {
            code: Some(code),
            message: Some(message),
        }) => format!("{code}: {message}"),
        Ok(ServiceErrorBody {
            message: Some(message),
            ..
        }) => message,
        _ => text,
    };

    Err(StorageError::Service {
        status: status.as_u16(),
        message,
    })
}
