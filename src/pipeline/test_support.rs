use serde::{Deserialize, Serialize};

use crate::Record;

/// Minimal record used by the pipeline unit tests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Record)]
#[record(resource = "items")]
pub struct Item {
    pub id: String,
    #[record(name, search)]
    pub title: String,
    #[record(brand, search)]
    pub brand: Option<String>,
    #[record(search)]
    pub seller: Option<String>,
    #[record(status)]
    pub status: Option<String>,
    #[record(kind)]
    pub kind: Option<String>,
    #[record(price)]
    pub price: f64,
    #[record(date)]
    pub year: i32,
    #[record(rating)]
    pub rating: Option<f64>,
}

pub fn item(id: &str, title: &str, price: f64) -> Item {
    Item {
        id: id.to_string(),
        title: title.to_string(),
        brand: None,
        seller: None,
        status: None,
        kind: None,
        price,
        year: 2020,
        rating: None,
    }
}
