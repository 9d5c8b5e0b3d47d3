//! Request normalization and query building
//!
//! A raw `SearchRequest` is validated and clamped into a
//! `NormalizedRequest`, which the `QueryBuilder` turns into an Elasticsearch
//! request for either search mode:
//! - exact: every whitespace-separated keyword token must phrase-match the title
//! - fuzzy: the whole keyword must match the title, ranked by score alone

mod builder;

pub use builder::QueryBuilder;

use crate::error::{Result, SearchError};
use crate::es::SortDirection;
use crate::search::SearchRequest;

/// Default largest page size a caller may ask for
pub const MAX_PAGE_SIZE: u32 = 50;

/// Default page size used when the requested one is out of range
pub const DEFAULT_PAGE_SIZE: u32 = 10;

pub const TITLE_FIELD: &str = "title";
pub const FINAL_PRICE_FIELD: &str = "price_end";
pub const COUPON_AMOUNT_FIELD: &str = "coupon_money";
pub const REBATE_AMOUNT_FIELD: &str = "tk_money";
pub const REBATE_RATE_FIELD: &str = "tk_rates";
pub const TOTAL_SALES_FIELD: &str = "total_sale";

/// Which of the two concurrent searches a query is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    Exact,
    Fuzzy,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
        }
    }
}

/// Field ordering selected by the request's sort code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    FinalPriceDesc,
    FinalPriceAsc,
    CouponAmountDesc,
    CouponAmountAsc,
    RebateAmountDesc,
    RebateAmountAsc,
    RebateRateDesc,
    RebateRateAsc,
    TotalSalesAsc,
    #[default]
    TotalSalesDesc,
}

impl SortOrder {
    /// Map a sort code. Single digits sort descending, the doubled digit
    /// ascending; `10` is ascending sales. Anything else is sales descending.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1" => Self::FinalPriceDesc,
            "11" => Self::FinalPriceAsc,
            "2" => Self::CouponAmountDesc,
            "22" => Self::CouponAmountAsc,
            "3" => Self::RebateAmountDesc,
            "33" => Self::RebateAmountAsc,
            "4" => Self::RebateRateDesc,
            "44" => Self::RebateRateAsc,
            "10" => Self::TotalSalesAsc,
            _ => Self::TotalSalesDesc,
        }
    }

    pub fn field(&self) -> (&'static str, SortDirection) {
        use SortDirection::{Asc, Desc};
        match self {
            Self::FinalPriceDesc => (FINAL_PRICE_FIELD, Desc),
            Self::FinalPriceAsc => (FINAL_PRICE_FIELD, Asc),
            Self::CouponAmountDesc => (COUPON_AMOUNT_FIELD, Desc),
            Self::CouponAmountAsc => (COUPON_AMOUNT_FIELD, Asc),
            Self::RebateAmountDesc => (REBATE_AMOUNT_FIELD, Desc),
            Self::RebateAmountAsc => (REBATE_AMOUNT_FIELD, Asc),
            Self::RebateRateDesc => (REBATE_RATE_FIELD, Desc),
            Self::RebateRateAsc => (REBATE_RATE_FIELD, Asc),
            Self::TotalSalesAsc => (TOTAL_SALES_FIELD, Asc),
            Self::TotalSalesDesc => (TOTAL_SALES_FIELD, Desc),
        }
    }
}

/// A validated request with paging clamped into range
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRequest {
    /// Trimmed, never blank
    pub keyword: String,
    pub sort: SortOrder,
    /// 1-based page
    pub page: u32,
    /// Within the page limits it was normalized with
    pub size: u32,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    /// Requested single index, not yet checked against the configured ones
    pub index: Option<String>,
    /// Run the fuzzy branch alongside the exact one
    pub fuzzy_fallback: bool,
}

impl NormalizedRequest {
    /// Normalize with the default page limits
    pub fn from_request(request: &SearchRequest) -> Result<Self> {
        Self::with_limits(request, &PageLimits::default())
    }

    pub fn with_limits(request: &SearchRequest, limits: &PageLimits) -> Result<Self> {
        let keyword = request.keyword.trim();
        if keyword.is_empty() {
            return Err(SearchError::KeywordMissing);
        }

        Ok(Self {
            keyword: keyword.to_string(),
            sort: SortOrder::from_code(&request.sort),
            page: clamp_page(request.from),
            size: limits.clamp_size(request.size),
            min_price: non_blank(request.min_price.as_deref()),
            max_price: non_blank(request.max_price.as_deref()),
            index: non_blank(request.es_index.as_deref()),
            fuzzy_fallback: request.recommend == 0,
        })
    }

    /// Offset of the first hit on the requested page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.size)
    }

    /// Keyword split on whitespace
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.keyword.split_whitespace()
    }
}

/// Pages start at 1
pub fn clamp_page(from: i64) -> u32 {
    if from < 1 {
        1
    } else {
        u32::try_from(from).unwrap_or(u32::MAX)
    }
}

/// Clamp a page size with the default limits
pub fn clamp_size(size: i64) -> u32 {
    PageLimits::default().clamp_size(size)
}

/// Allowed page sizes and the fallback for out-of-range ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    max_size: u32,
    default_size: u32,
}

impl PageLimits {
    /// `max_size` is at least 1 and `default_size` is kept within `1..=max_size`
    pub fn new(max_size: u32, default_size: u32) -> Self {
        let max_size = max_size.max(1);
        Self {
            max_size,
            default_size: default_size.clamp(1, max_size),
        }
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    pub fn default_size(&self) -> u32 {
        self.default_size
    }

    /// Out-of-range sizes fall back to the default rather than the nearest bound
    pub fn clamp_size(&self, size: i64) -> u32 {
        if (1..=i64::from(self.max_size)).contains(&size) {
            size as u32
        } else {
            self.default_size
        }
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self::new(MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
