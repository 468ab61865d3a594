use crate::pipe::validation::{max, not_blank, not_null, range};
use crate::pipe::{Bind, BindingResult, QueryParams, Validate, Violations};
use serde::Serialize;

pub const PRICE_MIN: i64 = 1_000;
pub const PRICE_MAX: i64 = 1_000_000;
pub const QUANTITY_MAX: i64 = 9_999;

/// An item as submitted in a query string. Built per request, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Option<i64>,
    pub item_name: Option<String>,
    pub price: Option<i32>,
    pub quantity: Option<i32>,
}

impl Bind for Item {
    fn bind(params: &QueryParams) -> BindingResult<Self> {
        let mut errors = Violations::new();
        let target = Item {
            id: params.parse("id", &mut errors),
            item_name: params.get("itemName").map(str::to_string),
            price: params.parse("price", &mut errors),
            quantity: params.parse("quantity", &mut errors),
        };
        BindingResult { target, errors }
    }
}

impl Validate for Item {
    fn validate(&self, violations: &mut Violations) {
        not_blank(violations, "itemName", self.item_name.as_deref());

        not_null(violations, "price", &self.price);
        range(
            violations,
            "price",
            self.price.map(i64::from),
            PRICE_MIN,
            PRICE_MAX,
        );

        not_null(violations, "quantity", &self.quantity);
        max(violations, "quantity", self.quantity.map(i64::from), QUANTITY_MAX);
    }
}
