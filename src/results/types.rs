//! Result type definitions

use crate::error::SearchError;
use serde::{Deserialize, Serialize};

/// A product listing in the shape shared by all marketplace indices.
///
/// Every field is kept as the string stored in the index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonResult {
    /// Marketplace the listing came from (`tb`, `jd`, `pdd`)
    pub goods_from: String,
    pub goods_id: String,
    /// Opaque promotion token (Pinduoduo only)
    pub goods_sign: String,
    pub title: String,
    pub title_short: String,
    pub description: String,
    /// List price
    pub price: String,
    /// Price after coupon
    pub price_end: String,
    pub total_sale: String,
    pub today_sale: String,
    /// Category id
    pub cid: String,
    pub shop_type: String,
    /// Main image
    pub pic: String,
    /// All images
    pub pic_all: String,
    pub coupon_start_time: String,
    pub coupon_end_time: String,
    pub coupon_num: String,
    pub coupon_surplus: String,
    pub coupon_money: String,
    /// Rebate rate
    pub tk_rates: String,
    /// Rebate amount
    pub tk_money: String,
}

/// The response handed back for every search request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// 200 on success, otherwise the error's status code
    pub code: u16,
    pub msg: String,
    /// Total matching documents
    pub total: u64,
    pub total_page: u64,
    /// Effective 1-based page
    pub from: u32,
    /// Effective page size
    pub size: u32,
    /// 1 when the items come from the fuzzy recommendation search
    pub is_recommend: u8,
    pub request_time: String,
    pub data: Vec<CommonResult>,
}

impl SearchResult {
    /// Successful result with no items
    pub fn empty(from: u32, size: u32) -> Self {
        Self {
            code: 200,
            msg: String::new(),
            total: 0,
            total_page: 0,
            from,
            size,
            is_recommend: 0,
            request_time: request_time(),
            data: Vec::new(),
        }
    }

    /// Result carrying an error's status and message
    pub fn failure(err: &SearchError, from: u32, size: u32) -> Self {
        Self {
            code: err.status_code(),
            msg: err.user_message().to_string(),
            ..Self::empty(from, size)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_success(&self) -> bool {
        self.code == 200
    }

    pub fn is_recommendation(&self) -> bool {
        self.is_recommend == 1
    }

    /// Stamp the result with the current time, e.g. when served from cache
    pub fn refresh_request_time(&mut self) {
        self.request_time = request_time();
    }
}

fn request_time() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_result_tolerates_missing_fields() {
        let item: CommonResult =
            serde_json::from_str(r#"{"goods_id": "9", "title": "mouse", "extra": 1}"#).unwrap();
        assert_eq!(item.goods_id, "9");
        assert_eq!(item.title, "mouse");
        assert!(item.price_end.is_empty());
    }

    #[test]
    fn test_failure_result() {
        let result = SearchResult::failure(&SearchError::KeywordMissing, 1, 10);
        assert_eq!(result.code, 400);
        assert_eq!(result.msg, "keyword missing");
        assert!(result.is_empty());
        assert!(!result.is_success());
        assert_eq!(result.request_time.len(), 19);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(SearchResult::empty(2, 20)).unwrap();
        for key in [
            "code",
            "msg",
            "total",
            "total_page",
            "from",
            "size",
            "is_recommend",
            "request_time",
            "data",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["from"], 2);
    }
}
