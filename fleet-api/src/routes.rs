use actix_web::error::InternalError;
use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::store::FleetStore;
use crate::types::{BusPayload, ErrorResponse, ListResponse, StopPayload, TrackPayload};

fn bad_request<E>(err: E, _req: &HttpRequest) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let body = ErrorResponse::new(format!("invalid request: {}", err));
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Registers all fleet routes plus the extractor error handlers that turn
/// malformed bodies, ids, and query strings into 400 JSON responses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(bad_request))
        .app_data(web::PathConfig::default().error_handler(bad_request))
        .app_data(web::QueryConfig::default().error_handler(bad_request))
        .service(create_bus)
        .service(list_buses)
        .service(get_bus)
        .service(update_bus)
        .service(delete_bus)
        .service(create_stop)
        .service(list_stops)
        .service(get_stop)
        .service(update_stop)
        .service(delete_stop)
        .service(create_track)
        .service(tracks_near)
        .service(latest_track)
        .service(list_tracks);
}

pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(ErrorResponse::new("endpoint not found"))
}

#[post("/api/buses")]
async fn create_bus(
    store: web::Data<FleetStore>,
    payload: web::Json<BusPayload>,
) -> impl Responder {
    HttpResponse::Created().json(store.create_bus(payload.into_inner()))
}

#[get("/api/buses")]
async fn list_buses(store: web::Data<FleetStore>) -> impl Responder {
    HttpResponse::Ok().json(ListResponse::new(store.list_buses()))
}

#[get("/api/buses/{id}")]
async fn get_bus(store: web::Data<FleetStore>, id: web::Path<Uuid>) -> impl Responder {
    match store.get_bus(*id) {
        Some(bus) => HttpResponse::Ok().json(bus),
        None => HttpResponse::NotFound().json(ErrorResponse::new("bus not found")),
    }
}

#[put("/api/buses/{id}")]
async fn update_bus(
    store: web::Data<FleetStore>,
    id: web::Path<Uuid>,
    payload: web::Json<BusPayload>,
) -> impl Responder {
    match store.update_bus(*id, payload.into_inner()) {
        Some(bus) => HttpResponse::Ok().json(bus),
        None => HttpResponse::NotFound().json(ErrorResponse::new("bus not found")),
    }
}

#[delete("/api/buses/{id}")]
async fn delete_bus(store: web::Data<FleetStore>, id: web::Path<Uuid>) -> impl Responder {
    if store.delete_bus(*id) {
        HttpResponse::Ok().json(json!({ "message": "bus deleted" }))
    } else {
        HttpResponse::NotFound().json(ErrorResponse::new("bus not found"))
    }
}

#[post("/api/stops")]
async fn create_stop(
    store: web::Data<FleetStore>,
    payload: web::Json<StopPayload>,
) -> impl Responder {
    match store.create_stop(payload.into_inner()) {
        Ok(stop) => HttpResponse::Created().json(stop),
        Err(_) => HttpResponse::Conflict()
            .json(ErrorResponse::new("stop with the same code or name already exists")),
    }
}

#[get("/api/stops")]
async fn list_stops(store: web::Data<FleetStore>) -> impl Responder {
    HttpResponse::Ok().json(ListResponse::new(store.list_stops()))
}

#[get("/api/stops/{id}")]
async fn get_stop(store: web::Data<FleetStore>, id: web::Path<Uuid>) -> impl Responder {
    match store.get_stop(*id) {
        Some(stop) => HttpResponse::Ok().json(stop),
        None => HttpResponse::NotFound().json(ErrorResponse::new("stop not found")),
    }
}

#[put("/api/stops/{id}")]
async fn update_stop(
    store: web::Data<FleetStore>,
    id: web::Path<Uuid>,
    payload: web::Json<StopPayload>,
) -> impl Responder {
    match store.update_stop(*id, payload.into_inner()) {
        Some(stop) => HttpResponse::Ok().json(stop),
        None => HttpResponse::NotFound().json(ErrorResponse::new("stop not found")),
    }
}

#[delete("/api/stops/{id}")]
async fn delete_stop(store: web::Data<FleetStore>, id: web::Path<Uuid>) -> impl Responder {
    if store.delete_stop(*id) {
        HttpResponse::Ok().json(json!({ "message": "stop deleted" }))
    } else {
        HttpResponse::NotFound().json(ErrorResponse::new("stop not found"))
    }
}

#[derive(Deserialize)]
struct TracksQuery {
    bus_id: Option<Uuid>,
    route: Option<String>,
}

fn default_radius() -> f64 {
    500.0
}

#[derive(Deserialize)]
struct NearQuery {
    lat: f64,
    lng: f64,
    #[serde(default = "default_radius")]
    radius: f64,
}

#[post("/api/tracks")]
async fn create_track(
    store: web::Data<FleetStore>,
    payload: web::Json<TrackPayload>,
) -> impl Responder {
    HttpResponse::Created().json(store.create_track(payload.into_inner()))
}

#[get("/api/tracks")]
async fn list_tracks(
    store: web::Data<FleetStore>,
    query: web::Query<TracksQuery>,
) -> impl Responder {
    let tracks = store.list_tracks(query.bus_id, query.route.as_deref());
    HttpResponse::Ok().json(ListResponse::new(tracks))
}

#[get("/api/tracks/latest/{bus_id}")]
async fn latest_track(store: web::Data<FleetStore>, bus_id: web::Path<Uuid>) -> impl Responder {
    match store.latest_track(*bus_id) {
        Some(track) => HttpResponse::Ok().json(track),
        None => HttpResponse::NotFound().json(ErrorResponse::new("no track found for this bus")),
    }
}

#[get("/api/tracks/near")]
async fn tracks_near(store: web::Data<FleetStore>, query: web::Query<NearQuery>) -> impl Responder {
    let tracks = store.tracks_near(query.lat, query.lng, query.radius);
    HttpResponse::Ok().json(ListResponse::new(tracks))
}
