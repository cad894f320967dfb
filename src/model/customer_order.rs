//! Typed form of the order the service publishes and returns under `CustomerOrder`.
//!
//! Rendering never relies on these types; they exist to build realistic
//! responses and to document what the widget usually receives.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerOrder {
    pub order_uid: String,
    pub track_number: String,
    pub entry: String,
    pub delivery: Delivery,
    pub payment: Payment,
    pub items: Vec<OrderItem>,
    pub locale: String,
    /// Published under the service's own spelling.
    #[serde(rename = "internal_sinature")]
    pub internal_signature: String,
    pub customer_id: String,
    pub delivery_service: String,
    pub shardkey: String,
    pub sm_id: i64,
    /// RFC 3339 timestamp.
    pub date_created: String,
    pub oof_shard: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub name: String,
    pub phone: String,
    pub zip: String,
    pub city: String,
    pub address: String,
    pub region: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub transaction: String,
    pub request_id: String,
    pub currency: String,
    pub provider: String,
    pub amount: i64,
    /// Unix time.
    pub payment_dt: i64,
    pub bank: String,
    pub delivery_cost: i64,
    pub goods_total: i64,
    pub customs_fee: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub chrt_id: i64,
    pub track_number: String,
    pub price: i64,
    pub rid: String,
    pub name: String,
    pub sale: i64,
    pub size: String,
    pub total_price: i64,
    pub nm_id: i64,
    pub brand: String,
    pub status: i64,
}

impl CustomerOrder {
    /// A complete order with one item, handy for demos and tests.
    pub fn sample(order_uid: impl Into<String>) -> Self {
        let order_uid = order_uid.into();
        let track_number = "WBILMTESTTRACK".to_string();
        Self {
            delivery: Delivery {
                name: "Test Testov".to_string(),
                phone: "+9720000000".to_string(),
                zip: "2639809".to_string(),
                city: "Kiryat Mozkin".to_string(),
                address: "Ploshad Mira 15".to_string(),
                region: "Kraiot".to_string(),
                email: "test@gmail.com".to_string(),
            },
            payment: Payment {
                transaction: order_uid.clone(),
                request_id: String::new(),
                currency: "USD".to_string(),
                provider: "wbpay".to_string(),
                amount: 1817,
                payment_dt: 1637907727,
                bank: "alpha".to_string(),
                delivery_cost: 1500,
                goods_total: 317,
                customs_fee: 0,
            },
            items: vec![OrderItem {
                chrt_id: 9934930,
                track_number: track_number.clone(),
                price: 453,
                rid: "ab4219087a764ae0btest".to_string(),
                name: "Mascaras".to_string(),
                sale: 30,
                size: "0".to_string(),
                total_price: 317,
                nm_id: 2389212,
                brand: "Vivienne Sabo".to_string(),
                status: 202,
            }],
            order_uid,
            track_number,
            entry: "WBIL".to_string(),
            locale: "en".to_string(),
            internal_signature: String::new(),
            customer_id: "test".to_string(),
            delivery_service: "meest".to_string(),
            shardkey: "9".to_string(),
            sm_id: 99,
            date_created: "2021-11-26T06:22:19Z".to_string(),
            oof_shard: "1".to_string(),
        }
    }

    /// The response body the lookup endpoint sends for this order.
    pub fn to_response(&self) -> Result<serde_json::Value, serde_json::Error> {
        Ok(serde_json::json!({ "CustomerOrder": serde_json::to_value(self)? }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_wraps_order() {
        let body = CustomerOrder::sample("b563feb7b2b84b6test").to_response().unwrap();
        let order = &body["CustomerOrder"];
        assert_eq!(order["order_uid"], "b563feb7b2b84b6test");
        assert_eq!(order["delivery"]["city"], "Kiryat Mozkin");
        assert_eq!(order["items"][0]["brand"], "Vivienne Sabo");

        let keys: Vec<&String> = order.as_object().unwrap().keys().collect();
        assert_eq!(keys[0], "order_uid");
        assert_eq!(keys[3], "delivery");
        assert_eq!(order["internal_sinature"], "");
        assert_eq!(order["payment"]["customs_fee"], 0);
    }

    #[test]
    fn test_reads_published_order() {
        let published = r#"{
            "order_uid": "b563feb7b2b84b6test",
            "track_number": "WBILMTESTTRACK",
            "entry": "WBIL",
            "delivery": {"name": "Test Testov", "phone": "+9720000000", "zip": "2639809", "city": "Kiryat Mozkin", "address": "Ploshad Mira 15", "region": "Kraiot", "email": "test@gmail.com"},
            "payment": {"transaction": "b563feb7b2b84b6test", "request_id": "", "currency": "USD", "provider": "wbpay", "amount": 1817, "payment_dt": 1637907727, "bank": "alpha", "delivery_cost": 1500, "goods_total": 317, "customs_fee": 12},
            "items": [{"chrt_id": 9934930, "track_number": "WBILMTESTTRACK", "price": 453, "rid": "ab4219087a764ae0btest", "name": "Mascaras", "sale": 30, "size": "0", "total_price": 317, "nm_id": 2389212, "brand": "Vivienne Sabo", "status": 202}],
            "locale": "en",
            "internal_sinature": "sig",
            "customer_id": "test",
            "delivery_service": "meest",
            "shardkey": "9",
            "sm_id": 99,
            "date_created": "2021-11-26T06:22:19Z",
            "oof_shard": "1"
        }"#;

        let order: CustomerOrder = serde_json::from_str(published).unwrap();
        assert_eq!(order.internal_signature, "sig");
        assert_eq!(order.payment.customs_fee, 12);
        assert_eq!(order.items[0].chrt_id, 9934930);
    }
}
