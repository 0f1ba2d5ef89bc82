//! Listing queries against the external catalog service.

use common::{
    fetch_error::FetchError,
    query_state::QueryState,
    search_const::param,
    search_result::{FetchResult, ListingSummary},
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    config::CatalogConfig,
    credential::SessionCredential,
    dto::{ErrorBodyDto, ListingDto, ListingPageDto, MapResponseDto},
};

pub const LIST_PATH: &str = "api/lots/list";
pub const MAP_PATH: &str = "api/lots/with-coordinates";
pub const LOT_PATH: &str = "api/lots/";

#[derive(Debug, Clone)]
pub struct ListingClient {
    http: Client,
    config: CatalogConfig,
    credential: Option<SessionCredential>,
}

impl ListingClient {
    pub fn new(config: CatalogConfig) -> Result<Self, FetchError> {
        #[cfg(not(target_arch = "wasm32"))]
        let builder = Client::builder().timeout(config.timeout);
        #[cfg(target_arch = "wasm32")]
        let builder = Client::builder();
        let http = builder
            .build()
            .map_err(|e| FetchError::Configuration(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { http, config, credential: None })
    }

    /// Endpoint configuration and session credential from the environment.
    pub fn from_env() -> Result<Self, FetchError> {
        let credential = SessionCredential::from_env();
        tracing::debug!(authenticated = credential.is_some(), "catalog client configured from environment");
        Ok(Self::new(CatalogConfig::from_env()?)?.with_credential(credential))
    }

    pub fn with_credential(mut self, credential: Option<SessionCredential>) -> Self {
        self.credential = credential;
        self
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// One page of listings for `state`.
    pub async fn fetch_listings(&self, state: &QueryState) -> Result<FetchResult, FetchError> {
        let mut params = filter_params(state);
        params.push((param::PAGE, state.page().to_string()));
        params.push((param::PAGE_SIZE, self.config.page_size.to_string()));
        let page: ListingPageDto = self.get(self.config.endpoint(LIST_PATH)?, &params).await?;
        Ok(page.into_result(state.clone()))
    }

    /// All listings with coordinates for `state`, ignoring pagination.
    pub async fn fetch_map_listings(&self, state: &QueryState) -> Result<FetchResult, FetchError> {
        let params = filter_params(state);
        let response: MapResponseDto = self.get(self.config.endpoint(MAP_PATH)?, &params).await?;
        Ok(response.into_page().into_result(state.clone()))
    }

    /// A single lot for the detail view.
    pub async fn fetch_lot(&self, lot_id: &str) -> Result<ListingSummary, FetchError> {
        let mut url = self.config.endpoint(LOT_PATH)?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Configuration(format!("{} cannot carry a path", self.config.base_url)))?
            .pop_if_empty()
            .push(lot_id);
        match self.get::<ListingDto>(url, &[]).await {
            Err(FetchError::TransientNetwork { status: Some(404), .. }) => {
                Err(FetchError::TransientNetwork { status: Some(404), message: "Лот не найден".to_string() })
            }
            other => other.map(ListingSummary::from),
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: Url, params: &[(&str, String)]) -> Result<T, FetchError> {
        tracing::info!(%url, params = params.len(), "catalog request");

        let mut request = self.http.get(url).query(params);
        if let Some(credential) = &self.credential {
            request = credential.attach(request);
        }
        #[cfg(target_arch = "wasm32")]
        {
            request = request.fetch_credentials_include();
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "catalog request failed");
            FetchError::transient(format!("Не удалось загрузить лоты: {e}"))
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::TransientNetwork { status: Some(status.as_u16()), message: e.to_string() })?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::warn!(error = %e, "catalog response could not be decoded");
            FetchError::TransientNetwork {
                status: Some(status.as_u16()),
                message: format!("Некорректный ответ сервиса: {e}"),
            }
        })
    }
}

/// Filter parameters shared by the list and map endpoints. Same names as the
/// address; the page is added separately.
fn filter_params(state: &QueryState) -> Vec<(&'static str, String)> {
    state.to_address_params().into_iter().filter(|(key, _)| *key != param::PAGE).collect()
}

fn status_error(status: StatusCode, body: &str) -> FetchError {
    let message = serde_json::from_str::<ErrorBodyDto>(body)
        .ok()
        .and_then(ErrorBodyDto::into_message)
        .unwrap_or_else(|| format!("Сервис каталога ответил {status}"));
    tracing::warn!(%status, %message, "catalog responded with an error");
    FetchError::TransientNetwork { status: Some(status.as_u16()), message }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use common::{
        query_state::{BiddingType, Ownership, QueryPatch},
        search_result::{AccessLevel, Coordinates},
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    use super::*;

    fn client_for(server: &MockServer) -> ListingClient {
        let url = Url::parse(&server.uri()).expect("mock server url");
        ListingClient::new(CatalogConfig::new(url)).expect("client")
    }

    fn filtered_state() -> QueryState {
        QueryState::default()
            .with_patch(QueryPatch {
                categories: Some(BTreeSet::from(["Квартиры".to_string(), "Гаражи".to_string()])),
                bidding_type: Some(BiddingType::OpenAuction),
                price_from: Some(Some(95_000)),
                ownership: Some(Ownership::SharedOnly),
                search_text: Some("Москва".to_string()),
                ..Default::default()
            })
            .with_page(3)
    }

    #[tokio::test]
    async fn sends_filters_and_paging_and_parses_the_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/lots/list"))
            .and(query_param("page", "3"))
            .and(query_param("pageSize", "20"))
            .and(query_param("biddingType", "Открытый аукцион"))
            .and(query_param("isSharedOwnership", "true"))
            .and(query_param("searchQuery", "Москва"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"id": "a1", "title": "Квартира 40 м²", "startPrice": "3500000.00", "biddingType": "Открытый аукцион",
                     "categories": [{"id": 1, "name": "Квартиры"}]},
                    {"id": 77, "description": "Гараж", "startPrice": 120000}
                ],
                "totalPages": 9,
                "totalCount": 170,
                "accessLevel": "Full"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_listings(&filtered_state()).await.expect("result");
        assert_eq!(result.query, filtered_state());
        assert_eq!((result.total_pages, result.total_count), (9, 170));
        assert_eq!(result.access_level, AccessLevel::Full);
        assert_eq!(result.items[0].start_price, Some(3_500_000));
        assert_eq!(result.items[0].categories, vec!["Квартиры".to_string()]);
        assert_eq!(result.items[1].id, "77");
        assert_eq!(result.items[1].title, "Гараж");

        let requests = server.received_requests().await.unwrap_or_default();
        let categories: Vec<String> = requests[0]
            .url
            .query_pairs()
            .filter(|(k, _)| k == "categories")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(categories, vec!["Гаражи".to_string(), "Квартиры".to_string()]);
    }

    #[tokio::test]
    async fn error_body_message_is_passed_through_verbatim() {
        let server = MockServer::start().await;
        Mock::given(path("/api/lots/list"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "Сервис временно недоступен"})))
            .mount(&server)
            .await;

        let error = client_for(&server).fetch_listings(&QueryState::default()).await.unwrap_err();
        assert_eq!(
            error,
            FetchError::TransientNetwork { status: Some(503), message: "Сервис временно недоступен".to_string() }
        );
    }

    #[tokio::test]
    async fn non_json_error_body_gets_a_generic_message() {
        let server = MockServer::start().await;
        Mock::given(path("/api/lots/list"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let error = client_for(&server).fetch_listings(&QueryState::default()).await.unwrap_err();
        assert!(matches!(error, FetchError::TransientNetwork { status: Some(502), .. }));
        assert!(!error.is_fatal());
    }

    #[tokio::test]
    async fn credential_is_attached_to_every_request() {
        let server = MockServer::start().await;
        Mock::given(path("/api/lots/with-coordinates"))
            .and(header("cookie", "session=opaque"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"id": "g1", "title": "Склад", "startPrice": 10, "latitude": 55.75, "longitude": 37.57}],
                "totalCount": 50,
                "accessLevel": "anonymous"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).with_credential(Some(SessionCredential::Cookie("session=opaque".into())));
        let result = client.fetch_map_listings(&QueryState::default()).await.expect("map result");
        assert_eq!(result.total_count, 50);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.access_level, AccessLevel::Anonymous);
        assert_eq!(result.items[0].coordinates, Some(Coordinates { latitude: 55.75, longitude: 37.57 }));
    }

    #[tokio::test]
    async fn map_endpoint_accepts_a_bare_array() {
        let server = MockServer::start().await;
        Mock::given(path("/api/lots/with-coordinates"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "g1", "title": "Склад", "startPrice": 10, "latitude": 55.0, "longitude": 37.0},
                {"id": "g2", "title": "Офис", "startPrice": 20, "latitude": 56.0, "longitude": 38.0}
            ])))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_map_listings(&QueryState::default()).await.expect("map result");
        assert_eq!(result.total_count, 2);
        assert_eq!(result.access_level, AccessLevel::Anonymous);
    }

    #[tokio::test]
    async fn single_lot_and_missing_lot() {
        let server = MockServer::start().await;
        Mock::given(path("/api/lots/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42, "title": "Дом", "startPrice": 1500000})))
            .mount(&server)
            .await;
        Mock::given(path("/api/lots/43"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let lot = client.fetch_lot("42").await.expect("lot");
        assert_eq!((lot.id.as_str(), lot.title.as_str(), lot.start_price), ("42", "Дом", Some(1_500_000)));
        let missing = client.fetch_lot("43").await.unwrap_err();
        assert_eq!(missing, FetchError::TransientNetwork { status: Some(404), message: "Лот не найден".to_string() });
    }

    #[tokio::test]
    async fn unreachable_service_is_transient() {
        let config = CatalogConfig::new(Url::parse("http://127.0.0.1:9").expect("url"));
        let error = ListingClient::new(config).expect("client").fetch_listings(&QueryState::default()).await.unwrap_err();
        assert!(matches!(error, FetchError::TransientNetwork { status: None, .. }));
    }
}
