use super::{optional_string, push, required_string, EnvelopeKeys, Payload, Resource};
use crate::error::AppError;
use crate::schema::{TableDef, COFFEE_TYPES};
use crate::sql::Fields;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoffeeType {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Resource for CoffeeType {
    const NOT_FOUND: &'static str = "Coffee type not found";
    const KEYS: EnvelopeKeys = EnvelopeKeys {
        created: "typecoffee",
        updated: "typecoffee",
        deleted: "typecoffee",
    };

    type New = NewCoffeeType;
    type Patch = CoffeeTypePatch;

    fn table() -> &'static TableDef {
        &COFFEE_TYPES
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCoffeeType {
    pub kind: String,
}

impl Payload for NewCoffeeType {
    fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        Ok(Self {
            kind: required_string(body, "type")?,
        })
    }

    fn into_fields(self) -> Fields {
        vec![("type", self.kind.into())]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoffeeTypePatch {
    pub kind: Option<String>,
}

impl Payload for CoffeeTypePatch {
    fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        Ok(Self {
            kind: optional_string(body, "type"),
        })
    }

    fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        push(&mut fields, "type", self.kind);
        fields
    }
}
