use dashmap::DashMap;
use uuid::Uuid;

use crate::types::{Bus, BusPayload, Stop, StopPayload, Track, TrackPayload};

const NEARBY_LIMIT: usize = 20;

/// A stop with the same `code` or `name` already exists.
#[derive(Debug)]
pub struct DuplicateStop;

/// In-memory fleet registry. All maps are keyed by generated UUIDs and
/// safe to share across request handlers.
#[derive(Default)]
pub struct FleetStore {
    buses: DashMap<Uuid, Bus>,
    stops: DashMap<Uuid, Stop>,
    tracks: DashMap<Uuid, Track>,
}

impl FleetStore {
    pub fn create_bus(&self, payload: BusPayload) -> Bus {
        let bus = Bus {
            id: Uuid::new_v4(),
            payload,
        };
        self.buses.insert(bus.id, bus.clone());
        bus
    }

    pub fn list_buses(&self) -> Vec<Bus> {
        self.buses.iter().map(|e| e.value().clone()).collect()
    }

    pub fn get_bus(&self, id: Uuid) -> Option<Bus> {
        self.buses.get(&id).map(|e| e.value().clone())
    }

    /// Full-document replacement: fields absent from `payload` are dropped.
    pub fn update_bus(&self, id: Uuid, payload: BusPayload) -> Option<Bus> {
        let mut entry = self.buses.get_mut(&id)?;
        *entry = Bus { id, payload };
        Some(entry.clone())
    }

    pub fn delete_bus(&self, id: Uuid) -> bool {
        self.buses.remove(&id).is_some()
    }

    pub fn create_stop(&self, payload: StopPayload) -> Result<Stop, DuplicateStop> {
        let taken = self
            .stops
            .iter()
            .any(|e| e.payload.code == payload.code || e.payload.name == payload.name);
        if taken {
            return Err(DuplicateStop);
        }
        let stop = Stop {
            id: Uuid::new_v4(),
            payload,
        };
        self.stops.insert(stop.id, stop.clone());
        Ok(stop)
    }

    /// Stops sorted by most recent demand update first.
    pub fn list_stops(&self) -> Vec<Stop> {
        let mut stops: Vec<Stop> = self.stops.iter().map(|e| e.value().clone()).collect();
        stops.sort_by(|a, b| b.payload.last_demand_update.cmp(&a.payload.last_demand_update));
        stops
    }

    pub fn get_stop(&self, id: Uuid) -> Option<Stop> {
        self.stops.get(&id).map(|e| e.value().clone())
    }

    pub fn update_stop(&self, id: Uuid, payload: StopPayload) -> Option<Stop> {
        let mut entry = self.stops.get_mut(&id)?;
        *entry = Stop { id, payload };
        Some(entry.clone())
    }

    pub fn delete_stop(&self, id: Uuid) -> bool {
        self.stops.remove(&id).is_some()
    }

    pub fn create_track(&self, payload: TrackPayload) -> Track {
        let track = Track {
            id: Uuid::new_v4(),
            payload,
        };
        self.tracks.insert(track.id, track.clone());
        track
    }

    /// Tracks matching the optional bus/route filters, newest first.
    pub fn list_tracks(&self, bus_id: Option<Uuid>, route: Option<&str>) -> Vec<Track> {
        let mut tracks: Vec<Track> = self
            .tracks
            .iter()
            .map(|e| e.value().clone())
            .filter(|t| bus_id.map_or(true, |id| t.payload.bus_id == id))
            .filter(|t| route.map_or(true, |r| t.payload.route.as_deref() == Some(r)))
            .collect();
        tracks.sort_by(|a, b| b.payload.ts.cmp(&a.payload.ts));
        tracks
    }

    pub fn latest_track(&self, bus_id: Uuid) -> Option<Track> {
        self.list_tracks(Some(bus_id), None).into_iter().next()
    }

    /// Tracks within `radius_m` meters of a point, newest first, capped at
    /// 20 results.
    pub fn tracks_near(&self, lat: f64, lng: f64, radius_m: f64) -> Vec<Track> {
        let mut tracks: Vec<Track> = self
            .tracks
            .iter()
            .map(|e| e.value().clone())
            .filter(|t| {
                let [tlat, tlng] = t.payload.loc.coordinates;
                geodist::haversine_distance(lat, lng, tlat, tlng) * 1000.0 <= radius_m
            })
            .collect();
        tracks.sort_by(|a, b| b.payload.ts.cmp(&a.payload.ts));
        tracks.truncate(NEARBY_LIMIT);
        tracks
    }
}
