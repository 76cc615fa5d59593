//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `DocumentStoreProvider`
//! using the OpenSearch Rust crate. The same REST dialect is served by
//! Elasticsearch, so the provider works against either.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials as TransportCredentials,
    cert::{Certificate, CertificateValidation},
    http::{
        request::JsonBody,
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
    },
    indices::{
        IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesRefreshParts,
    },
    BulkParts, CountParts, DeleteParts, GetParts, IndexParts, OpenSearch, SearchParts,
    UpdateParts,
};
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::errors::DocumentStoreError;
use crate::interfaces::DocumentStoreProvider;
use crate::opensearch::responses::{self, ServiceFailure};
use crate::types::BulkIndexSummary;
use docstore_shared::{Document, Fields, IndexSpec, SearchQuery, SearchResponse};

/// OpenSearch provider implementation.
///
/// Holds one transport bound to `host:port` with basic authentication. The
/// transport pools connections, so a single provider serves concurrent calls.
///
/// # Example
///
/// ```no_run
/// use docstore_repository::{ClientConfig, Credentials, OpenSearchProvider};
///
/// let config = ClientConfig::new(Credentials::new("localhost", 9200, "elastic", "changeme"));
/// let provider = OpenSearchProvider::new(&config)?;
/// # Ok::<(), docstore_repository::DocumentStoreError>(())
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
    base_url: String,
}

impl OpenSearchProvider {
    /// Create a new provider for the configured service.
    ///
    /// No request is sent; use `ping` to verify connectivity.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(DocumentStoreError::ConnectionError)` - If the URL, CA certificate
    ///   or transport setup is invalid
    pub fn new(config: &ClientConfig) -> Result<Self, DocumentStoreError> {
        let base_url = config.credentials.base_url();
        let parsed_url =
            Url::parse(&base_url).map_err(|e| DocumentStoreError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .auth(TransportCredentials::Basic(
                config.credentials.username.clone(),
                config.credentials.password.clone(),
            ))
            .cert_validation(Self::certificate_validation(config)?)
            .disable_proxy()
            .build()
            .map_err(|e| DocumentStoreError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %base_url,
            username = %config.credentials.username,
            verify_certs = config.verify_certs,
            "Created OpenSearch provider"
        );

        Ok(Self { client, base_url })
    }

    /// The base URL this provider talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn certificate_validation(
        config: &ClientConfig,
    ) -> Result<CertificateValidation, DocumentStoreError> {
        if !config.verify_certs {
            warn!(
                url = %config.credentials.base_url(),
                "TLS certificate validation is disabled"
            );
            return Ok(CertificateValidation::None);
        }

        match &config.ca_cert_path {
            Some(path) => {
                let pem = std::fs::read(path).map_err(|e| {
                    DocumentStoreError::connection(format!(
                        "failed to read CA certificate {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                let certificate = Certificate::from_pem(&pem)
                    .map_err(|e| DocumentStoreError::connection(e.to_string()))?;
                Ok(CertificateValidation::Full(certificate))
            }
            None => Ok(CertificateValidation::Default),
        }
    }

    fn transport_error(e: opensearch::Error) -> DocumentStoreError {
        DocumentStoreError::connection(e.to_string())
    }

    async fn read_failure(response: Response) -> ServiceFailure {
        let status = response.status_code().as_u16();
        let body = response.text().await.unwrap_or_default();
        let failure = ServiceFailure::from_body(status, &body);
        debug!(status = status, failure = %failure, "Service rejected request");
        failure
    }

    async fn read_json(response: Response) -> Result<Value, DocumentStoreError> {
        response
            .json::<Value>()
            .await
            .map_err(|e| DocumentStoreError::parse(e.to_string()))
    }
}

#[async_trait]
impl DocumentStoreProvider for OpenSearchProvider {
    async fn ping(&self) -> Result<bool, DocumentStoreError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status_code();
        debug!(status = %status, "Ping answered");
        Ok(status.is_success())
    }

    async fn cluster_info(&self) -> Result<Value, DocumentStoreError> {
        let response = self
            .client
            .info()
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status_code().is_success() {
            let failure = Self::read_failure(response).await;
            return Err(DocumentStoreError::connection(failure.to_string()));
        }

        Self::read_json(response).await
    }

    /// Create the index described by `spec`.
    ///
    /// The service answers an existing index with
    /// `resource_already_exists_exception`, which is reported as an
    /// `IndexCreationError` like any other rejection.
    async fn create_index(&self, spec: &IndexSpec) -> Result<(), DocumentStoreError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&spec.name))
            .body(spec.create_body())
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status_code().is_success() {
            let failure = Self::read_failure(response).await;
            if failure.is_type("resource_already_exists_exception") {
                debug!(index = %spec.name, "Index already exists");
            }
            return Err(DocumentStoreError::index_creation(failure.to_string()));
        }

        debug!(index = %spec.name, "Index created");
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<(), DocumentStoreError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status_code().is_success() {
            let failure = Self::read_failure(response).await;
            if failure.is_not_found() {
                return Err(DocumentStoreError::index_not_found(index));
            }
            return Err(DocumentStoreError::delete(failure.to_string()));
        }

        debug!(index = %index, "Index deleted");
        Ok(())
    }

    async fn index_exists(&self, index: &str) -> Result<bool, DocumentStoreError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(Self::transport_error)?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            _ => {
                let failure = Self::read_failure(response).await;
                Err(DocumentStoreError::connection(failure.to_string()))
            }
        }
    }

    async fn refresh_index(&self, index: &str) -> Result<(), DocumentStoreError> {
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[index]))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status_code().is_success() {
            let failure = Self::read_failure(response).await;
            if failure.is_not_found() {
                return Err(DocumentStoreError::index_not_found(index));
            }
            return Err(DocumentStoreError::indexing(failure.to_string()));
        }

        debug!(index = %index, "Index refreshed");
        Ok(())
    }

    /// Index a document under its id, or `POST` it to the index for a
    /// service-assigned id.
    async fn index_document(
        &self,
        index: &str,
        document: &Document,
    ) -> Result<String, DocumentStoreError> {
        let body = document.to_value();
        let response = match &document.id {
            Some(id) => {
                self.client
                    .index(IndexParts::IndexId(index, id))
                    .body(body)
                    .send()
                    .await
            }
            None => self.client.index(IndexParts::Index(index)).body(body).send().await,
        }
        .map_err(Self::transport_error)?;

        if !response.status_code().is_success() {
            let failure = Self::read_failure(response).await;
            return Err(DocumentStoreError::indexing(failure.to_string()));
        }

        let id = responses::assigned_id(&Self::read_json(response).await?)?;
        debug!(index = %index, id = %id, "Document indexed");
        Ok(id)
    }

    async fn bulk_index(
        &self,
        index: &str,
        documents: &[Document],
    ) -> Result<BulkIndexSummary, DocumentStoreError> {
        let body: Vec<JsonBody<Value>> = responses::bulk_index_lines(documents)
            .into_iter()
            .map(JsonBody::new)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status_code().is_success() {
            let failure = Self::read_failure(response).await;
            return Err(DocumentStoreError::indexing(failure.to_string()));
        }

        let summary = responses::parse_bulk_response(&Self::read_json(response).await?, documents)?;
        debug!(
            index = %index,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk request processed"
        );
        Ok(summary)
    }

    async fn get_document(&self, index: &str, id: &str) -> Result<Document, DocumentStoreError> {
        let response = self
            .client
            .get(GetParts::IndexId(index, id))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status_code().is_success() {
            let failure = Self::read_failure(response).await;
            if failure.is_not_found() {
                return Err(DocumentStoreError::document_not_found(index, id));
            }
            return Err(DocumentStoreError::query(failure.to_string()));
        }

        responses::parse_get_response(index, id, &Self::read_json(response).await?)
    }

    /// Merge `fields` into the stored document.
    ///
    /// No upsert: a missing document is reported as `NotFound`.
    async fn update_document(
        &self,
        index: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), DocumentStoreError> {
        let response = self
            .client
            .update(UpdateParts::IndexId(index, id))
            .body(json!({ "doc": fields }))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status_code().is_success() {
            let failure = Self::read_failure(response).await;
            if failure.is_not_found() {
                return Err(DocumentStoreError::document_not_found(index, id));
            }
            return Err(DocumentStoreError::update(failure.to_string()));
        }

        debug!(index = %index, id = %id, "Document updated");
        Ok(())
    }

    async fn delete_document(&self, index: &str, id: &str) -> Result<(), DocumentStoreError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(index, id))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status_code().is_success() {
            let failure = Self::read_failure(response).await;
            if failure.is_not_found() {
                return Err(DocumentStoreError::document_not_found(index, id));
            }
            return Err(DocumentStoreError::delete(failure.to_string()));
        }

        debug!(index = %index, id = %id, "Document deleted");
        Ok(())
    }

    async fn search(
        &self,
        index: &str,
        query: &SearchQuery,
    ) -> Result<SearchResponse, DocumentStoreError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(query.body().clone())
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status_code().is_success() {
            let failure = Self::read_failure(response).await;
            if failure.is_not_found() {
                return Err(DocumentStoreError::index_not_found(index));
            }
            return Err(DocumentStoreError::query(failure.to_string()));
        }

        Ok(SearchResponse::new(Self::read_json(response).await?))
    }

    async fn count_documents(
        &self,
        index: &str,
        query: Option<&SearchQuery>,
    ) -> Result<u64, DocumentStoreError> {
        let indices = [index];
        let request = self.client.count(CountParts::Index(&indices));
        let response = match query {
            Some(query) => {
                request
                    .body(responses::count_body(query.body()))
                    .send()
                    .await
            }
            None => request.send().await,
        }
        .map_err(Self::transport_error)?;

        if !response.status_code().is_success() {
            let failure = Self::read_failure(response).await;
            if failure.is_not_found() {
                return Err(DocumentStoreError::index_not_found(index));
            }
            return Err(DocumentStoreError::query(failure.to_string()));
        }

        Self::read_json(response).await?["count"]
            .as_u64()
            .ok_or_else(|| DocumentStoreError::parse("count response has no count"))
    }
}
