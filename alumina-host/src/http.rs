//! HTTP host client speaking the platform's response envelope

use crate::client::{HostClient, SelectionValues, VariantOverrides};
use crate::config::HostConfig;
use crate::error::{HostError, HostResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{ApiResponse, AttributeValue, ItemSummary, ResolvedVariant, TemplateAttributes};
use uuid::Uuid;

/// HTTP client for making remote calls to the host platform
#[derive(Debug, Clone)]
pub struct HttpHost {
    client: Client,
    base_url: String,
    auth_header: Option<String>,
}

impl HttpHost {
    /// Create a new HTTP host client from configuration
    pub fn new(config: &HostConfig) -> HostResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_header: config.auth_header(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> HostResult<T> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, path, "host GET");

        let mut request = self
            .client
            .get(self.url(path))
            .header("x-request-id", request_id.to_string());
        if let Some(ref auth) = self.auth_header {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> HostResult<T> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, path, "host POST");

        let mut request = self
            .client
            .post(self.url(path))
            .header("x-request-id", request_id.to_string())
            .json(body);
        if let Some(ref auth) = self.auth_header {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response, unwrapping the envelope
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> HostResult<T> {
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(HostError::Status {
                code: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<T> = response.json().await?;
        if !envelope.is_success() {
            return Err(HostError::Status {
                code: envelope.code.unwrap_or(1),
                message: envelope.message,
            });
        }
        envelope
            .data
            .ok_or_else(|| HostError::InvalidResponse("missing data".to_string()))
    }

    /// Map a 404 answer to `Ok(None)`
    fn optional<T>(result: HostResult<T>) -> HostResult<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(HostError::Status { code, .. }) if code == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

#[derive(Serialize)]
struct VariantQuery<'a> {
    template: &'a str,
    values: &'a SelectionValues,
}

#[derive(Serialize)]
struct CreateVariantRequest<'a> {
    template: &'a str,
    values: &'a SelectionValues,
    #[serde(flatten)]
    overrides: &'a VariantOverrides,
}

#[async_trait]
impl HostClient for HttpHost {
    async fn template_attributes(&self, template: &str) -> HostResult<TemplateAttributes> {
        self.get(&format!("api/templates/{}/attributes", template))
            .await
    }

    async fn search_attribute_values(
        &self,
        attribute: &str,
        query: &str,
    ) -> HostResult<Vec<AttributeValue>> {
        #[derive(Serialize)]
        struct SearchRequest<'a> {
            attribute: &'a str,
            query: &'a str,
        }

        self.post("api/attributes/search", &SearchRequest { attribute, query })
            .await
    }

    async fn find_variant(
        &self,
        template: &str,
        values: &SelectionValues,
    ) -> HostResult<Option<ResolvedVariant>> {
        let result = self
            .post("api/variants/find", &VariantQuery { template, values })
            .await;
        Self::optional(result)
    }

    async fn create_variant(
        &self,
        template: &str,
        values: &SelectionValues,
        overrides: &VariantOverrides,
    ) -> HostResult<ResolvedVariant> {
        self.post(
            "api/variants",
            &CreateVariantRequest {
                template,
                values,
                overrides,
            },
        )
        .await
    }

    async fn item(&self, item_code: &str) -> HostResult<Option<ItemSummary>> {
        let result = self.get(&format!("api/items/{}", item_code)).await;
        Self::optional(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_cleanly() {
        let host = HttpHost::new(&HostConfig::new("http://localhost:8000/")).unwrap();
        assert_eq!(
            host.url("/api/items/AL-01"),
            "http://localhost:8000/api/items/AL-01"
        );
        assert_eq!(host.url("api/variants"), "http://localhost:8000/api/variants");
    }

    #[test]
    fn test_optional_maps_not_found() {
        let found: HostResult<i32> = Ok(1);
        assert_eq!(HttpHost::optional(found).unwrap(), Some(1));

        let missing: HostResult<i32> = Err(HostError::Status {
            code: 404,
            message: "no".to_string(),
        });
        assert_eq!(HttpHost::optional(missing).unwrap(), None);

        let broken: HostResult<i32> = Err(HostError::Status {
            code: 500,
            message: "boom".to_string(),
        });
        assert!(HttpHost::optional(broken).is_err());
    }

    #[test]
    fn test_create_request_flattens_overrides() {
        let values: SelectionValues =
            [("Powder Code".to_string(), "Red".to_string())].into_iter().collect();
        let overrides = VariantOverrides {
            item_code: Some("CUSTOM-01".to_string()),
            ..Default::default()
        };
        let request = CreateVariantRequest {
            template: "AL-PROFILE",
            values: &values,
            overrides: &overrides,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["template"], "AL-PROFILE");
        assert_eq!(json["values"]["Powder Code"], "Red");
        assert_eq!(json["item_code"], "CUSTOM-01");
        assert!(json.get("overrides").is_none());
    }
}
