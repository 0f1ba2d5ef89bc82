//! Wire shapes of the catalog service responses.

use common::{
    price_format::parse_price_input,
    query_state::QueryState,
    search_result::{AccessLevel, Coordinates, FetchResult, ListingSummary},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPageDto {
    #[serde(default)]
    pub items: Vec<ListingDto>,
    #[serde(default)]
    pub total_pages: u64,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub access_level: Option<String>,
    #[serde(default)]
    pub visible_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IdDto {
    Text(String),
    Number(u64),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceDto {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CategoryDto {
    Name(String),
    Object {
        #[serde(alias = "Name")]
        name: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDto {
    #[serde(alias = "Id")]
    pub id: IdDto,
    #[serde(default, alias = "Title")]
    pub title: Option<String>,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(default, alias = "StartPrice")]
    pub start_price: Option<PriceDto>,
    #[serde(default, alias = "BiddingType")]
    pub bidding_type: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryDto>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ErrorBodyDto {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorBodyDto {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.trim().is_empty())
    }
}

pub fn parse_access_level(raw: Option<&str>) -> AccessLevel {
    match raw.map(|r| r.trim().to_ascii_lowercase()).as_deref() {
        Some("full") => AccessLevel::Full,
        Some("limited") => AccessLevel::Limited,
        Some("anonymous") | None => AccessLevel::Anonymous,
        Some(other) => {
            tracing::warn!(access_level = other, "unknown access level, treating as anonymous");
            AccessLevel::Anonymous
        }
    }
}

impl PriceDto {
    fn into_price(self) -> Option<u64> {
        match self {
            PriceDto::Number(n) if n.is_finite() && n >= 0.0 => Some(n.trunc() as u64),
            PriceDto::Number(_) => None,
            // decimal strings like "125000.00" lose the fraction before digits are kept
            PriceDto::Text(text) => parse_price_input(text.split(['.', ',']).next().unwrap_or_default()),
        }
    }
}

impl From<ListingDto> for ListingSummary {
    fn from(dto: ListingDto) -> Self {
        let coordinates = match (dto.latitude, dto.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            _ => None,
        };
        ListingSummary {
            id: match dto.id {
                IdDto::Text(id) => id,
                IdDto::Number(id) => id.to_string(),
            },
            title: dto.title.or(dto.description).unwrap_or_default(),
            start_price: dto.start_price.and_then(PriceDto::into_price),
            bidding_type: dto.bidding_type,
            categories: dto
                .categories
                .into_iter()
                .map(|c| match c {
                    CategoryDto::Name(name) | CategoryDto::Object { name } => name,
                })
                .collect(),
            image_url: dto.image_url,
            coordinates,
        }
    }
}

impl ListingPageDto {
    pub fn into_result(self, query: QueryState) -> FetchResult {
        let items: Vec<ListingSummary> = self.items.into_iter().map(ListingSummary::from).collect();
        // map responses are unpaginated and may omit the total
        let total_count = self.total_count.unwrap_or(items.len() as u64);
        FetchResult {
            query,
            total_count,
            total_pages: self.total_pages,
            access_level: parse_access_level(self.access_level.as_deref()),
            visible_count: self.visible_count,
            items,
        }
    }
}

/// Map endpoints may answer with a bare array instead of the page envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MapResponseDto {
    Bare(Vec<ListingDto>),
    Page(ListingPageDto),
}

impl MapResponseDto {
    pub fn into_page(self) -> ListingPageDto {
        match self {
            MapResponseDto::Page(page) => page,
            MapResponseDto::Bare(items) => ListingPageDto {
                items,
                total_pages: 1,
                total_count: None,
                access_level: None,
                visible_count: None,
            },
        }
    }
}
