//! Pinduoduo feed payload

use super::{FeedPage, Marketplace};
use crate::results::CommonResult;
use serde::{Deserialize, Serialize};

pub type PddHdk = FeedPage<PddHdkData>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PddHdkData {
    pub goods_id: String,
    pub goods_sign: String,
    #[serde(rename = "goodsname")]
    pub goods_name: String,
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
    pub pdd_image: String,
    pub cat_id: String,
    #[serde(rename = "itemendprice")]
    pub item_end_price: String,
    #[serde(rename = "couponmoney")]
    pub coupon_money: String,
    pub promotion_rate: String,
    /// Expected commission: price * promotion_rate / 100
    pub commission: String,
    #[serde(rename = "couponsurplus")]
    pub coupon_surplus: String,
    #[serde(rename = "couponnum")]
    pub coupon_num: String,
    #[serde(rename = "couponstarttime")]
    pub coupon_start_time: String,
    #[serde(rename = "couponendtime")]
    pub coupon_end_time: String,
    #[serde(rename = "extracouponmoney")]
    pub extra_coupon_money: String,
}

impl From<PddHdkData> for CommonResult {
    fn from(item: PddHdkData) -> Self {
        CommonResult {
            goods_from: Marketplace::Pdd.as_str().to_string(),
            goods_id: item.goods_id,
            goods_sign: item.goods_sign,
            title: item.goods_name,
            description: item.goods_desc,
            price: item.item_price,
            price_end: item.item_end_price,
            total_sale: item.item_sale,
            today_sale: item.today_sale,
            cid: item.cat_id,
            pic: item.item_pic,
            pic_all: item.pdd_image,
            coupon_start_time: item.coupon_start_time,
            coupon_end_time: item.coupon_end_time,
            coupon_num: item.coupon_num,
            coupon_surplus: item.coupon_surplus,
            coupon_money: item.coupon_money,
            tk_rates: item.promotion_rate,
            tk_money: item.commission,
            ..Default::default()
        }
    }
}
