use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Geographic point, `[latitude, longitude]` in decimal degrees.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeoPoint {
    pub coordinates: [f64; 2],
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusStatus {
    #[default]
    InService,
    OutOfService,
    Maintenance,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Capacity {
    pub seated: Option<u32>,
    pub standing: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BusPayload {
    pub fleet_no: String,
    pub plate: Option<String>,
    pub operator: Option<String>,
    pub model: Option<String>,
    pub capacity: Option<Capacity>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub status: BusStatus,
    pub assigned_route: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Bus {
    pub id: Uuid,
    #[serde(flatten)]
    pub payload: BusPayload,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StopPayload {
    pub code: String,
    pub name: String,
    pub location: GeoPoint,
    pub zone: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub served_routes: Vec<String>,
    #[serde(default)]
    pub demand_score: f64,
    pub last_demand_update: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Stop {
    pub id: Uuid,
    #[serde(flatten)]
    pub payload: StopPayload,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Occupancy {
    pub observed: Option<u32>,
    pub confidence: Option<f64>,
}

/// One telemetry snapshot from a bus.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrackPayload {
    #[serde(default = "Utc::now")]
    pub ts: DateTime<Utc>,
    pub bus_id: Uuid,
    pub route: Option<String>,
    pub loc: GeoPoint,
    pub speed_kmh: Option<f64>,
    pub heading_deg: Option<f64>,
    pub near_stop_id: Option<Uuid>,
    pub occupancy: Option<Occupancy>,
    pub source: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Track {
    pub id: Uuid,
    #[serde(flatten)]
    pub payload: TrackPayload,
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        ListResponse {
            success: true,
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            error: message.into(),
        }
    }
}
