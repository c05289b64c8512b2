//! Test data builders

use chrono::NaiveDate;
use fake::Fake;
use fake::faker::name::en::Name;
use StudioLedger::models::{CreateClientRequest, CreateOrderItemRequest, CreateServiceRequest, Sex};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// A client with a fixed name and no contact fields
pub fn client_request(name: &str) -> CreateClientRequest {
    CreateClientRequest {
        name: name.to_string(),
        sex: Sex::Male,
        phone: None,
        vk_id: None,
        tg_id: None,
        group_id: None,
    }
}

/// A client with a generated name and no contact fields
pub fn random_client_request() -> CreateClientRequest {
    client_request(&Name().fake::<String>())
}

pub fn item_request(order_id: i64, amount: i64, payment_date: NaiveDate, hours: f64) -> CreateOrderItemRequest {
    CreateOrderItemRequest {
        order_id,
        service_name: "Recording session".to_string(),
        payment_date,
        amount,
        hours,
    }
}

pub fn service_request(name: &str, min_price: i64) -> CreateServiceRequest {
    CreateServiceRequest {
        name: name.to_string(),
        min_price,
        description: None,
    }
}
