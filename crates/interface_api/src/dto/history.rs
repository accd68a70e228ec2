//! History DTOs

use chrono::NaiveDate;
use serde::Serialize;

use domain_vehicle::HistoryEvent;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEventResponse {
    /// `Policy` or `Claim`
    pub kind: String,
    pub description: String,
    pub date: NaiveDate,
}

impl From<HistoryEvent> for HistoryEventResponse {
    fn from(event: HistoryEvent) -> Self {
        Self {
            kind: event.kind.to_string(),
            description: event.description,
            date: event.date,
        }
    }
}
