//! Google Sheets v4 sink.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;

use super::google_auth::ServiceAccountAuth;
use super::{SinkError, TabularSink};

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange<'a, T: Serialize> {
    major_dimension: &'static str,
    values: &'a [T],
}

/// Writes the report into one worksheet of a Google spreadsheet.
#[derive(Clone)]
pub struct SheetsSink {
    http: Client,
    auth: ServiceAccountAuth,
    api_base: String,
    spreadsheet_id: String,
    sheet_name: String,
}

impl SheetsSink {
    /// Sink writing to `sheet_name` in spreadsheet `spreadsheet_id`.
    pub fn new(
        http: Client,
        auth: ServiceAccountAuth,
        spreadsheet_id: impl Into<String>,
        sheet_name: impl Into<String>,
    ) -> Self {
        Self {
            http,
            auth,
            api_base: SHEETS_API_BASE.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            sheet_name: sheet_name.into(),
        }
    }

    /// Overrides the Sheets API root URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// A1 range on this sheet; names that are not plain words get quoted.
    fn range(&self, cells: Option<&str>) -> String {
        let plain = self
            .sheet_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
        let sheet = if plain {
            self.sheet_name.clone()
        } else {
            format!("'{}'", self.sheet_name.replace('\'', "''"))
        };
        match cells {
            Some(cells) => format!("{}!{}", sheet, cells),
            None => sheet,
        }
    }

    fn values_url(&self, range_segment: &str) -> Result<Url, SinkError> {
        let mut url = Url::parse(&self.api_base).map_err(|err| SinkError::Network(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| SinkError::Network(format!("{} cannot be a base url", self.api_base)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range_segment]);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<(), SinkError> {
        let token = self.auth.access_token().await?;
        let response = request.bearer_auth(token).send().await?;
        self.ensure_success(response).await
    }

    async fn ensure_success(&self, response: Response) -> Result<(), SinkError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        warn!("sheets request failed with {}", status);
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            self.auth.invalidate().await;
            Err(SinkError::Authentication(format!(
                "Access denied ({}) - {}",
                status, body
            )))
        } else {
            Err(SinkError::Http { status, message: body })
        }
    }
}

#[async_trait]
impl TabularSink for SheetsSink {
    async fn set_header(&self, header: &[&str]) -> Result<(), SinkError> {
        let last_column = column_letter(header.len().max(1));
        let url = self.values_url(&self.range(Some(&format!("A1:{}1", last_column))))?;
        let rows = [header];
        let body = ValueRange {
            major_dimension: "ROWS",
            values: &rows,
        };
        let request = self
            .http
            .put(url)
            .query(&[("valueInputOption", "RAW")])
            .json(&body);
        self.send(request).await
    }

    async fn clear(&self) -> Result<(), SinkError> {
        let url = self.values_url(&format!("{}:clear", self.range(None)))?;
        let request = self.http.post(url).json(&serde_json::json!({}));
        self.send(request).await?;
        debug!("cleared sheet {}", self.sheet_name);
        Ok(())
    }

    async fn append_rows(&self, rows: &[Vec<String>]) -> Result<(), SinkError> {
        if rows.is_empty() {
            return Ok(());
        }
        let url = self.values_url(&format!("{}:append", self.range(Some("A2"))))?;
        let body = ValueRange {
            major_dimension: "ROWS",
            values: rows,
        };
        let request = self
            .http
            .post(url)
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .json(&body);
        self.send(request).await?;
        debug!("appended {} row(s) to sheet {}", rows.len(), self.sheet_name);
        Ok(())
    }
}

/// Spreadsheet column name for a 1-based index (1 → A, 27 → AA).
fn column_letter(mut index: usize) -> String {
    let mut name = Vec::new();
    while index > 0 {
        let rem = (index - 1) % 26;
        name.push(b'A' + rem as u8);
        index = (index - 1) / 26;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}
