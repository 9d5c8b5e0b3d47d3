//! Taobao feed payload

use super::{FeedPage, Marketplace};
use crate::results::CommonResult;
use serde::{Deserialize, Serialize};

pub type TaoBaoHdk = FeedPage<TaoBaoHdkData>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaoBaoHdkData {
    #[serde(rename = "itemid")]
    pub item_id: String,
    #[serde(rename = "itemtitle")]
    pub item_title: String,
    #[serde(rename = "itemshorttitle")]
    pub item_short_title: String,
    #[serde(rename = "itemdesc")]
    pub item_desc: String,
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
    pub taobao_image: String,
    #[serde(rename = "fqcat")]
    pub fq_cat: String,
    #[serde(rename = "itemendprice")]
    pub item_end_price: String,
    #[serde(rename = "shoptype")]
    pub shop_type: String,
    #[serde(rename = "couponmoney")]
    pub coupon_money: String,
    pub is_brand: String,
    pub guide_article: String,
    #[serde(rename = "shopname")]
    pub shop_name: String,
    #[serde(rename = "tkrates")]
    pub tk_rates: String,
    #[serde(rename = "tkmoney")]
    pub tk_money: String,
    #[serde(rename = "couponsurplus")]
    pub coupon_surplus: String,
    #[serde(rename = "couponnum")]
    pub coupon_num: String,
    #[serde(rename = "couponexplain")]
    pub coupon_explain: String,
    #[serde(rename = "couponstarttime")]
    pub coupon_start_time: String,
    #[serde(rename = "couponendtime")]
    pub coupon_end_time: String,
    pub discount: String,
    pub deposit: String,
    pub deposit_deduct: String,
    #[serde(rename = "couponinfo")]
    pub coupon_info: String,
}

impl From<TaoBaoHdkData> for CommonResult {
    fn from(item: TaoBaoHdkData) -> Self {
        CommonResult {
            goods_from: Marketplace::Taobao.as_str().to_string(),
            goods_id: item.item_id,
            goods_sign: String::new(),
            title: item.item_title,
            title_short: item.item_short_title,
            description: item.item_desc,
            price: item.item_price,
            price_end: item.item_end_price,
            total_sale: item.item_sale,
            today_sale: item.today_sale,
            cid: item.fq_cat,
            shop_type: item.shop_type,
            pic: item.item_pic,
            pic_all: item.taobao_image,
            coupon_start_time: item.coupon_start_time,
            coupon_end_time: item.coupon_end_time,
            coupon_num: item.coupon_num,
            coupon_surplus: item.coupon_surplus,
            coupon_money: item.coupon_money,
            tk_rates: item.tk_rates,
            tk_money: item.tk_money,
        }
    }
}
