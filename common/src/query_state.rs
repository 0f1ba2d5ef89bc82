//! Canonical filter and pagination state for the lot catalog.
//!
//! A [`QueryState`] is only ever produced by [`QueryState::default`],
//! [`QueryState::from_address_params`] or [`QueryState::with_patch`], so the
//! normalisation rules (trimmed search text, ordered price bounds, page >= 1)
//! hold for every value in circulation and structural equality coincides with
//! equality of the serialized address.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::search_const::{BIDDING_TYPES, param};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BiddingType {
    #[default]
    Any,
    OpenAuction,
    PublicOffer,
}

impl BiddingType {
    pub const CHOICES: [BiddingType; 3] = [BiddingType::Any, BiddingType::OpenAuction, BiddingType::PublicOffer];

    /// Value used in addresses and catalog requests. `None` for [`BiddingType::Any`].
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            BiddingType::Any => None,
            BiddingType::OpenAuction => Some(BIDDING_TYPES[0]),
            BiddingType::PublicOffer => Some(BIDDING_TYPES[1]),
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim() {
            v if v == BIDDING_TYPES[0] => Some(BiddingType::OpenAuction),
            v if v == BIDDING_TYPES[1] => Some(BiddingType::PublicOffer),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        self.as_param().unwrap_or("Все")
    }
}

/// Ownership structure filter. Serialized as `isSharedOwnership=true|false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Ownership {
    #[default]
    Any,
    WholeOnly,
    SharedOnly,
}

impl Ownership {
    pub const CHOICES: [Ownership; 3] = [Ownership::Any, Ownership::WholeOnly, Ownership::SharedOnly];

    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            Ownership::Any => None,
            Ownership::WholeOnly => Some("false"),
            Ownership::SharedOnly => Some("true"),
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim() {
            "false" => Some(Ownership::WholeOnly),
            "true" => Some(Ownership::SharedOnly),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Ownership::Any => "Все",
            Ownership::WholeOnly => "Целиком",
            Ownership::SharedOnly => "Только доли",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryState {
    categories: BTreeSet<String>,
    bidding_type: BiddingType,
    price_from: Option<u64>,
    price_to: Option<u64>,
    ownership: Ownership,
    search_text: String,
    page: u64,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            categories: BTreeSet::new(),
            bidding_type: BiddingType::Any,
            price_from: None,
            price_to: None,
            ownership: Ownership::Any,
            search_text: String::new(),
            page: 1,
        }
    }
}

/// A partial update to a [`QueryState`]. `None` leaves a field untouched;
/// the price fields use `Some(None)` to clear a bound.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryPatch {
    pub categories: Option<BTreeSet<String>>,
    pub bidding_type: Option<BiddingType>,
    pub price_from: Option<Option<u64>>,
    pub price_to: Option<Option<u64>>,
    pub ownership: Option<Ownership>,
    pub search_text: Option<String>,
    pub page: Option<u64>,
}

impl QueryPatch {
    pub fn categories(categories: BTreeSet<String>) -> Self {
        Self { categories: Some(categories), ..Default::default() }
    }

    pub fn bidding_type(bidding_type: BiddingType) -> Self {
        Self { bidding_type: Some(bidding_type), ..Default::default() }
    }

    pub fn ownership(ownership: Ownership) -> Self {
        Self { ownership: Some(ownership), ..Default::default() }
    }

    pub fn page(page: u64) -> Self {
        Self { page: Some(page), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True if the patch carries any field other than `page`.
    pub fn touches_filters(&self) -> bool {
        self.categories.is_some()
            || self.bidding_type.is_some()
            || self.price_from.is_some()
            || self.price_to.is_some()
            || self.ownership.is_some()
            || self.search_text.is_some()
    }

    /// Combines two patches; fields set in `later` win.
    pub fn merge(self, later: QueryPatch) -> QueryPatch {
        QueryPatch {
            categories: later.categories.or(self.categories),
            bidding_type: later.bidding_type.or(self.bidding_type),
            price_from: later.price_from.or(self.price_from),
            price_to: later.price_to.or(self.price_to),
            ownership: later.ownership.or(self.ownership),
            search_text: later.search_text.or(self.search_text),
            page: later.page.or(self.page),
        }
    }
}

impl QueryState {
    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub fn bidding_type(&self) -> BiddingType {
        self.bidding_type
    }

    pub fn price_from(&self) -> Option<u64> {
        self.price_from
    }

    pub fn price_to(&self) -> Option<u64> {
        self.price_to
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn page(&self) -> u64 {
        self.page
    }


    /// Applies `patch` and returns the new state. Any filter field in the
    /// patch resets pagination to the first page.
    pub fn with_patch(&self, patch: QueryPatch) -> QueryState {
        let resets_page = patch.touches_filters();
        let mut next = self.clone();
        if let Some(categories) = patch.categories {
            next.categories = categories;
        }
        if let Some(bidding_type) = patch.bidding_type {
            next.bidding_type = bidding_type;
        }
        if let Some(price_from) = patch.price_from {
            next.price_from = price_from;
        }
        if let Some(price_to) = patch.price_to {
            next.price_to = price_to;
        }
        if let Some(ownership) = patch.ownership {
            next.ownership = ownership;
        }
        if let Some(search_text) = patch.search_text {
            next.search_text = search_text;
        }
        if let Some(page) = patch.page {
            next.page = page;
        }
        if resets_page {
            next.page = 1;
        }
        next.normalized()
    }

    pub fn with_page(&self, page: u64) -> QueryState {
        self.with_patch(QueryPatch::page(page))
    }

    fn normalized(mut self) -> Self {
        self.search_text = self.search_text.trim().to_string();
        self.categories = std::mem::take(&mut self.categories)
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if let (Some(from), Some(to)) = (self.price_from, self.price_to) {
            if from > to {
                self.price_from = Some(to);
                self.price_to = Some(from);
            }
        }
        self.page = self.page.max(1);
        self
    }

    /// Reads a state from address parameters. Every field falls back to its
    /// default on its own when missing or malformed; unknown keys are ignored.
    /// For scalar fields the last occurrence wins.
    pub fn from_address_params<I, K, V>(params: I) -> QueryState
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut state = QueryState::default();
        for (key, value) in params {
            let value = value.as_ref();
            match key.as_ref() {
                param::CATEGORIES => {
                    state.categories.insert(value.to_string());
                }
                param::BIDDING_TYPE => {
                    state.bidding_type = parse_or_default(param::BIDDING_TYPE, value, BiddingType::from_param);
                }
                param::PRICE_FROM => {
                    state.price_from = parse_or_default(param::PRICE_FROM, value, parse_price);
                }
                param::PRICE_TO => {
                    state.price_to = parse_or_default(param::PRICE_TO, value, parse_price);
                }
                param::IS_SHARED_OWNERSHIP => {
                    state.ownership = parse_or_default(param::IS_SHARED_OWNERSHIP, value, Ownership::from_param);
                }
                param::SEARCH_QUERY => {
                    state.search_text = value.to_string();
                }
                param::PAGE => {
                    state.page = parse_or_default(param::PAGE, value, parse_page).unwrap_or(1);
                }
                _ => {}
            }
        }
        state.normalized()
    }

    /// Serializes the state to address parameters, omitting every field that
    /// equals its default. Categories become repeated entries in sorted order.
    pub fn to_address_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        for category in &self.categories {
            params.push((param::CATEGORIES, category.clone()));
        }
        if let Some(bidding_type) = self.bidding_type.as_param() {
            params.push((param::BIDDING_TYPE, bidding_type.to_string()));
        }
        if let Some(price_from) = self.price_from {
            params.push((param::PRICE_FROM, price_from.to_string()));
        }
        if let Some(price_to) = self.price_to {
            params.push((param::PRICE_TO, price_to.to_string()));
        }
        if !self.search_text.is_empty() {
            params.push((param::SEARCH_QUERY, self.search_text.clone()));
        }
        if let Some(ownership) = self.ownership.as_param() {
            params.push((param::IS_SHARED_OWNERSHIP, ownership.to_string()));
        }
        if self.page != 1 {
            params.push((param::PAGE, self.page.to_string()));
        }
        params
    }
}

fn parse_price(value: &str) -> Option<Option<u64>> {
    let value = value.trim();
    if value.is_empty() {
        return Some(None);
    }
    value.parse::<u64>().ok().map(Some)
}

// Wrapped in an extra Option so the default (None) means "first page".
fn parse_page(value: &str) -> Option<Option<u64>> {
    value.trim().parse::<u64>().ok().filter(|page| *page >= 1).map(Some)
}

fn parse_or_default<T: Default>(field: &str, value: &str, parse: impl Fn(&str) -> Option<T>) -> T {
    match parse(value) {
        Some(parsed) => parsed,
        None => {
            tracing::debug!(field, value, "address value not understood, using default");
            T::default()
        }
    }
}
