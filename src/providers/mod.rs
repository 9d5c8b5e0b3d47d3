//! Upstream marketplace feeds
//!
//! Each feed delivers listings with its own field names. These payload
//! types deserialize the feeds and map every row into `CommonResult`, the
//! shape stored in the source indices.

pub mod jd;
pub mod pdd;
pub mod taobao;

pub use jd::{JdHdk, JdHdkData};
pub use pdd::{PddHdk, PddHdkData};
pub use taobao::{TaoBaoHdk, TaoBaoHdkData};

use crate::results::CommonResult;
use serde::{Deserialize, Serialize};

/// The marketplace a listing was collected from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marketplace {
    #[serde(rename = "tb")]
    Taobao,
    Jd,
    Pdd,
}

impl Marketplace {
    /// Tag stored in `CommonResult::goods_from`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Taobao => "tb",
            Self::Jd => "jd",
            Self::Pdd => "pdd",
        }
    }
}

/// Envelope shared by all three feeds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPage<T> {
    #[serde(default)]
    pub code: i64,
    /// Cursor for the next page
    #[serde(default)]
    pub min_id: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T: Into<CommonResult>> FeedPage<T> {
    /// Map every row of the page
    pub fn into_common(self) -> Vec<CommonResult> {
        self.data.into_iter().map(Into::into).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marketplace_tags() {
        assert_eq!(Marketplace::Taobao.as_str(), "tb");
        assert_eq!(serde_json::to_string(&Marketplace::Taobao).unwrap(), "\"tb\"");
        assert_eq!(serde_json::to_string(&Marketplace::Pdd).unwrap(), "\"pdd\"");
    }
}
