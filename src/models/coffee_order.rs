use super::{
    check_i32, optional_integer, optional_string, push, required_integer, required_string,
    EnvelopeKeys, Payload, Resource,
};
use crate::error::AppError;
use crate::schema::{TableDef, COFFEE_ORDERS};
use crate::sql::Fields;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoffeeOrder {
    pub id: i64,
    /// References `CoffeeType::id`; the store enforces it.
    pub typecoffee_id: i64,
    pub count: i32,
    pub description: String,
    pub customer_name: String,
}

impl Resource for CoffeeOrder {
    const NOT_FOUND: &'static str = "Coffee order not found";
    const KEYS: EnvelopeKeys = EnvelopeKeys {
        created: "coffee",
        updated: "coffee",
        deleted: "coffee",
    };

    type New = NewCoffeeOrder;
    type Patch = CoffeeOrderPatch;

    fn table() -> &'static TableDef {
        &COFFEE_ORDERS
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCoffeeOrder {
    pub typecoffee_id: i64,
    pub count: i64,
    pub description: String,
    pub customer_name: String,
}

impl Payload for NewCoffeeOrder {
    fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        Ok(Self {
            typecoffee_id: required_integer(body, "typecoffee_id")?,
            count: check_i32("count", required_integer(body, "count")?)?,
            description: required_string(body, "description")?,
            customer_name: required_string(body, "customer_name")?,
        })
    }

    fn into_fields(self) -> Fields {
        vec![
            ("typecoffee_id", self.typecoffee_id.into()),
            ("count", self.count.into()),
            ("description", self.description.into()),
            ("customer_name", self.customer_name.into()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoffeeOrderPatch {
    pub typecoffee_id: Option<i64>,
    pub count: Option<i64>,
    pub description: Option<String>,
    pub customer_name: Option<String>,
}

impl Payload for CoffeeOrderPatch {
    fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        let count = match optional_integer(body, "count")? {
            Some(n) => Some(check_i32("count", n)?),
            None => None,
        };
        Ok(Self {
            typecoffee_id: optional_integer(body, "typecoffee_id")?,
            count,
            description: optional_string(body, "description"),
            customer_name: optional_string(body, "customer_name"),
        })
    }

    fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        push(&mut fields, "typecoffee_id", self.typecoffee_id);
        push(&mut fields, "count", self.count);
        push(&mut fields, "description", self.description);
        push(&mut fields, "customer_name", self.customer_name);
        fields
    }
}
