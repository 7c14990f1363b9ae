use super::{
    optional_date, optional_string, push, required_date, required_string, EnvelopeKeys, Payload,
    Resource,
};
use crate::error::AppError;
use crate::schema::{TableDef, STUDENTS};
use crate::sql::Fields;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Natural key; unique across students.
    pub student_id: String,
    pub birth_date: NaiveDate,
    pub gender: String,
}

impl Resource for Student {
    const NOT_FOUND: &'static str = "Student not found";
    const KEYS: EnvelopeKeys = EnvelopeKeys {
        created: "students",
        updated: "student",
        deleted: "students",
    };

    type New = NewStudent;
    type Patch = StudentPatch;

    fn table() -> &'static TableDef {
        &STUDENTS
    }

    fn parse_key(raw: &str) -> Result<Value, AppError> {
        Ok(Value::String(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub student_id: String,
    /// Normalized `YYYY-MM-DD`.
    pub birth_date: String,
    pub gender: String,
}

impl Payload for NewStudent {
    fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        Ok(Self {
            first_name: required_string(body, "firstName")?,
            last_name: required_string(body, "lastName")?,
            student_id: required_string(body, "studentId")?,
            birth_date: required_date(body, "birthDate")?,
            gender: required_string(body, "gender")?,
        })
    }

    fn into_fields(self) -> Fields {
        vec![
            ("firstName", self.first_name.into()),
            ("lastName", self.last_name.into()),
            ("studentId", self.student_id.into()),
            ("birthDate", self.birth_date.into()),
            ("gender", self.gender.into()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub student_id: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
}

impl Payload for StudentPatch {
    fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        Ok(Self {
            first_name: optional_string(body, "firstName"),
            last_name: optional_string(body, "lastName"),
            student_id: optional_string(body, "studentId"),
            birth_date: optional_date(body, "birthDate")?,
            gender: optional_string(body, "gender"),
        })
    }

    fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        push(&mut fields, "firstName", self.first_name);
        push(&mut fields, "lastName", self.last_name);
        push(&mut fields, "studentId", self.student_id);
        push(&mut fields, "birthDate", self.birth_date);
        push(&mut fields, "gender", self.gender);
        fields
    }
}
