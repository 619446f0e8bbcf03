//! Response types for the Sigfox API v2.
//!
//! Field names use camelCase on the wire. Required fields are plain types so
//! a response missing them fails to decode; optional metadata is `Option`.
//! Fields not modeled here land in `extra` where the API is known to return
//! large, version-dependent objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Pagination ───────────────────────────────────────────────────────

/// Generic list envelope returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub paging: Paging,
}

/// Pagination block. `next` is an absolute URL to the following page,
/// absent on the last page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// `true` when the server reported no further page.
    pub fn is_last(&self) -> bool {
        self.paging.next.is_none()
    }

    /// Append `other`'s items after ours and adopt its cursor.
    pub fn merge(&mut self, other: Page<T>) {
        self.data.extend(other.data);
        self.paging = other.paging;
    }

    pub fn into_items(self) -> Vec<T> {
        self.data
    }
}

// ── Shared ───────────────────────────────────────────────────────────

/// Reference to another entity, e.g. `"deviceType": {"id": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

fn from_millis(ms: Option<i64>) -> Option<DateTime<Utc>> {
    ms.and_then(DateTime::from_timestamp_millis)
}

// ── Contracts ────────────────────────────────────────────────────────

/// Contract overview, from `GET /contract-infos/`.
///
/// Only `id` and `name` are relied upon; the rest is informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub communication_end_time: Option<i64>,
    #[serde(default)]
    pub activation_end_time: Option<i64>,
    #[serde(default)]
    pub automatic_renewal: Option<bool>,
    /// Renewal duration in months.
    #[serde(default)]
    pub renewal_duration: Option<i64>,
    #[serde(default)]
    pub max_tokens: Option<i64>,
    #[serde(default)]
    pub tokens_in_use: Option<i64>,
    #[serde(default)]
    pub tokens_used: Option<i64>,
    #[serde(default)]
    pub subscription_plan: Option<i64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub group: Option<EntityRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Device types ─────────────────────────────────────────────────────

/// Device type, from `GET /device-types/`.
///
/// Both `id` and `name` may be null in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceType {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Keep-alive period in seconds.
    #[serde(default)]
    pub keep_alive: Option<i64>,
    #[serde(default)]
    pub contract: Option<EntityRef>,
    #[serde(default)]
    pub group: Option<EntityRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Devices ──────────────────────────────────────────────────────────

/// Full device record, from `GET /devices/{id}` and contract listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub device_type: Option<EntityRef>,
    #[serde(default)]
    pub contract: Option<EntityRef>,
    #[serde(default)]
    pub group: Option<EntityRef>,
    #[serde(default)]
    pub location: Option<Location>,
    /// 0=OK, 1=DEAD, 2=OFF_CONTRACT, 3=DISABLED, 4=WARN, 5=DELETED, 6=SUSPENDED, 7=NOT_ACTIVABLE
    #[serde(default)]
    pub state: Option<i32>,
    /// 0=OK, 1=DEAD, 2=NO_DOWNLINK, 3=NEVER_SEEN, 4=UNKNOWN, 5=ALERT
    #[serde(default)]
    pub com_state: Option<i32>,
    #[serde(default)]
    pub pac: Option<String>,
    #[serde(default)]
    pub sequence_number: Option<i64>,
    /// Epoch milliseconds of the last message.
    #[serde(default)]
    pub last_com: Option<i64>,
    #[serde(default)]
    pub lqi: Option<i32>,
    #[serde(default)]
    pub activation_time: Option<i64>,
    #[serde(default)]
    pub creation_time: Option<i64>,
    #[serde(default)]
    pub prototype: Option<bool>,
    #[serde(default)]
    pub automatic_renewal: Option<bool>,
    #[serde(default)]
    pub activable: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Device {
    pub fn last_communication(&self) -> Option<DateTime<Utc>> {
        from_millis(self.last_com)
    }
}

/// Minimal device shape returned by `POST /devices/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseDevice {
    pub id: String,
}

// ── Messages ─────────────────────────────────────────────────────────

/// Uplink message, from `GET /devices/{id}/messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Epoch milliseconds at which the message was received.
    pub time: i64,
    /// Hex-encoded payload.
    pub data: String,
    #[serde(default)]
    pub device: Option<EntityRef>,
    #[serde(default)]
    pub seq_number: Option<i64>,
    #[serde(default)]
    pub nb_frames: Option<i32>,
    #[serde(default)]
    pub rollover_counter: Option<i64>,
    #[serde(default)]
    pub lqi: Option<i32>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        from_millis(Some(self.time))
    }
}

/// Message counters, from `GET /devices/{id}/messages/metric`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStats {
    pub last_day: u64,
    pub last_week: u64,
    pub last_month: u64,
}
