use super::{
    optional_string, optional_timestamp, push, required_string, required_timestamp, EnvelopeKeys,
    Payload, Resource,
};
use crate::error::AppError;
use crate::schema::{TableDef, BOOKS};
use crate::sql::Fields;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub detail: String,
    pub synopsis: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub published_at: DateTime<Utc>,
}

impl Resource for Book {
    const NOT_FOUND: &'static str = "Book not found";
    const KEYS: EnvelopeKeys = EnvelopeKeys {
        created: "book",
        updated: "book",
        deleted: "book",
    };

    type New = NewBook;
    type Patch = BookPatch;

    fn table() -> &'static TableDef {
        &BOOKS
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub detail: String,
    pub synopsis: String,
    pub kind: String,
    /// RFC 3339, UTC.
    pub published_at: String,
}

impl Payload for NewBook {
    fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        Ok(Self {
            title: required_string(body, "title")?,
            author: required_string(body, "author")?,
            detail: required_string(body, "detail")?,
            synopsis: required_string(body, "synopsis")?,
            kind: required_string(body, "type")?,
            published_at: required_timestamp(body, "publishedAt")?,
        })
    }

    fn into_fields(self) -> Fields {
        vec![
            ("title", self.title.into()),
            ("author", self.author.into()),
            ("detail", self.detail.into()),
            ("synopsis", self.synopsis.into()),
            ("type", self.kind.into()),
            ("publishedAt", self.published_at.into()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub detail: Option<String>,
    pub synopsis: Option<String>,
    pub kind: Option<String>,
    pub published_at: Option<String>,
}

impl Payload for BookPatch {
    fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        Ok(Self {
            title: optional_string(body, "title"),
            author: optional_string(body, "author"),
            detail: optional_string(body, "detail"),
            synopsis: optional_string(body, "synopsis"),
            kind: optional_string(body, "type"),
            published_at: optional_timestamp(body, "publishedAt")?,
        })
    }

    fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        push(&mut fields, "title", self.title);
        push(&mut fields, "author", self.author);
        push(&mut fields, "detail", self.detail);
        push(&mut fields, "synopsis", self.synopsis);
        push(&mut fields, "type", self.kind);
        push(&mut fields, "publishedAt", self.published_at);
        fields
    }
}
