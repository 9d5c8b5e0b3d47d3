//! JD feed payload

use super::{FeedPage, Marketplace};
use crate::results::CommonResult;
use serde::{Deserialize, Serialize};

pub type JdHdk = FeedPage<JdHdkData>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JdHdkData {
    #[serde(rename = "skuid")]
    pub sku_id: String,
    #[serde(rename = "goodsname")]
    pub goods_name: String,
    #[serde(rename = "goodsnameshort")]
    pub goods_name_short: String,
    #[serde(rename = "goodsdesc")]
    pub goods_desc: String,
    #[serde(rename = "itemprice")]
    pub item_price: String,
    #[serde(rename = "itemsale")]
    pub item_sale: String,
    #[serde(rename = "itemsale2")]
    pub item_sale2: String,
    #[serde(rename = "todaysale")]
    pub today_sale: String,
    #[serde(rename = "itempic")]
    pub item_pic: String,
    pub jd_image: String,
    pub cid: String,
    #[serde(rename = "itemendprice")]
    pub item_end_price: String,
    #[serde(rename = "couponmoney")]
    pub coupon_money: String,
    /// Commission rate
    #[serde(rename = "commissionshare")]
    pub commission_share: String,
    pub commission: String,
    #[serde(rename = "couponSurplus")]
    pub coupon_surplus: String,
    #[serde(rename = "couponnum")]
    pub coupon_num: String,
    #[serde(rename = "couponstarttime")]
    pub coupon_start_time: String,
    #[serde(rename = "couponendtime")]
    pub coupon_end_time: String,
}

impl From<JdHdkData> for CommonResult {
    fn from(item: JdHdkData) -> Self {
        CommonResult {
            goods_from: Marketplace::Jd.as_str().to_string(),
            goods_id: item.sku_id,
            title: item.goods_name,
            title_short: item.goods_name_short,
            description: item.goods_desc,
            price: item.item_price,
            price_end: item.item_end_price,
            total_sale: item.item_sale,
            today_sale: item.today_sale,
            cid: item.cid,
            pic: item.item_pic,
            pic_all: item.jd_image,
            coupon_start_time: item.coupon_start_time,
            coupon_end_time: item.coupon_end_time,
            coupon_num: item.coupon_num,
            coupon_surplus: item.coupon_surplus,
            coupon_money: item.coupon_money,
            tk_rates: item.commission_share,
            tk_money: item.commission,
            ..Default::default()
        }
    }
}
