//! Recording in-memory gateway for service tests.

use super::{ApiError, ApiResult, Gateway, UploadObject, UploadOptions};
use crate::models::Session;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    SelectAll(String),
    SelectOne {
        table: String,
        column: String,
        value: String,
    },
    Insert {
        table: String,
        row: Value,
    },
    Upload {
        bucket: String,
        key: String,
        options: UploadOptions,
    },
    SignedUrl {
        bucket: String,
        key: String,
        ttl_secs: u32,
    },
    GetSession,
}

#[derive(Default)]
pub(crate) struct MockGateway {
    calls: RefCell<Vec<Call>>,
    tables: RefCell<HashMap<String, Vec<Value>>>,
    failing_tables: HashSet<String>,
    upload_error: Option<String>,
    insert_error: Option<String>,
    signed_url_error: Option<String>,
    session: Option<Session>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, table: &str, rows: Vec<Value>) -> Self {
        self.tables.borrow_mut().insert(table.to_string(), rows);
        self
    }

    pub fn failing_reads(mut self, table: &str) -> Self {
        self.failing_tables.insert(table.to_string());
        self
    }

    pub fn failing_upload(mut self, message: &str) -> Self {
        self.upload_error = Some(message.to_string());
        self
    }

    pub fn failing_insert(mut self, message: &str) -> Self {
        self.insert_error = Some(message.to_string());
        self
    }

    pub fn failing_signed_url(mut self, message: &str) -> Self {
        self.signed_url_error = Some(message.to_string());
        self
    }

    pub fn with_session(mut self, user_id: &str) -> Self {
        self.session = Some(Session {
            user_id: user_id.to_string(),
        });
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables.borrow().get(table).cloned().unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn read(&self, table: &str) -> ApiResult<Vec<Value>> {
        if self.failing_tables.contains(table) {
            return Err(ApiError::from_response(
                500,
                r#"{"message":"relation is unavailable"}"#,
            ));
        }
        Ok(self.rows(table))
    }
}

fn cell_matches(cell: Option<&Value>, value: &str) -> bool {
    match cell {
        Some(Value::String(s)) => s == value,
        Some(Value::Number(n)) => n.to_string() == value,
        _ => false,
    }
}

impl Gateway for MockGateway {
    async fn select_all<T: DeserializeOwned>(&self, table: &str) -> ApiResult<Vec<T>> {
        self.record(Call::SelectAll(table.to_string()));
        let rows = self.read(table)?;
        serde_json::from_value(Value::Array(rows)).map_err(ApiError::parse)
    }

    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> ApiResult<Option<T>> {
        self.record(Call::SelectOne {
            table: table.to_string(),
            column: column.to_string(),
            value: value.to_string(),
        });
        let row = self
            .read(table)?
            .into_iter()
            .find(|r| cell_matches(r.get(column), value));
        row.map(|r| serde_json::from_value(r).map_err(ApiError::parse))
            .transpose()
    }

    async fn insert<R: Serialize>(&self, table: &str, row: &R) -> ApiResult<()> {
        let row = serde_json::to_value(row).map_err(ApiError::parse)?;
        self.record(Call::Insert {
            table: table.to_string(),
            row: row.clone(),
        });
        if let Some(message) = &self.insert_error {
            return Err(ApiError::from_response(
                400,
                &serde_json::json!({ "message": message }).to_string(),
            ));
        }
        self.tables
            .borrow_mut()
            .entry(table.to_string())
            .or_default()
            .push(row);
        Ok(())
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        _object: &UploadObject,
        options: &UploadOptions,
    ) -> ApiResult<String> {
        self.record(Call::Upload {
            bucket: bucket.to_string(),
            key: key.to_string(),
            options: options.clone(),
        });
        match &self.upload_error {
            Some(message) => Err(ApiError::from_response(
                400,
                &serde_json::json!({ "message": message }).to_string(),
            )),
            None => Ok(key.to_string()),
        }
    }

    async fn create_signed_url(
        &self,
        bucket: &str,
        key: &str,
        ttl_secs: u32,
    ) -> ApiResult<String> {
        self.record(Call::SignedUrl {
            bucket: bucket.to_string(),
            key: key.to_string(),
            ttl_secs,
        });
        match &self.signed_url_error {
            Some(message) => Err(ApiError::from_response(
                404,
                &serde_json::json!({ "message": message }).to_string(),
            )),
            None => Ok(format!("https://mock.test/signed/{bucket}/{key}?ttl={ttl_secs}")),
        }
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("https://mock.test/storage/v1/object/public/{bucket}/{key}")
    }

    async fn get_session(&self) -> ApiResult<Option<Session>> {
        self.record(Call::GetSession);
        Ok(self.session.clone())
    }
}
