use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tokio::sync::Mutex as AsyncMutex;
use tower::ServiceExt;
use uuid::Uuid;
use venuelink_api::{app, AppState};
use venuelink_booking::SessionState;
use venuelink_domain::notify::{PushMessage, PushRelay};
use venuelink_domain::repository::{FavoriteRepository, ReservationRepository, VenueRepository};
use venuelink_domain::reservation::{Reservation, ReservationStatus};
use venuelink_domain::schedule::{Weekday, WeeklySchedule};
use venuelink_domain::venue::Venue;
use venuelink_store::config::BookingRules;

struct InMemoryReservationRepo {
    reservations: Mutex<Vec<Reservation>>,
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepo {
    async fn insert(
        &self,
        reservation: &Reservation,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.reservations.lock().unwrap().push(reservation.clone());
        Ok(())
    }

    async fn list_for_requester(
        &self,
        requester_id: Uuid,
    ) -> Result<Vec<Reservation>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.requester_id == requester_id)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let mut reservations = self.reservations.lock().unwrap();
        match reservations.iter_mut().find(|r| r.id == id) {
            Some(reservation) => {
                reservation.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(
        &self,
        id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let mut reservations = self.reservations.lock().unwrap();
        let before = reservations.len();
        reservations.retain(|r| r.id != id);
        Ok(reservations.len() < before)
    }
}

struct SingleVenueRepo {
    venue: Venue,
}

#[async_trait]
impl VenueRepository for SingleVenueRepo {
    async fn list(&self) -> Result<Vec<Venue>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(vec![self.venue.clone()])
    }

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<Venue>, Box<dyn std::error::Error + Send + Sync>> {
        Ok((self.venue.id == id).then(|| self.venue.clone()))
    }

    async fn push_token(
        &self,
        id: Uuid,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        Ok((self.venue.id == id)
            .then(|| self.venue.push_token.clone())
            .flatten())
    }
}

#[derive(Default)]
struct RecordingPushRelay {
    sent: Mutex<Vec<PushMessage>>,
}

#[async_trait]
impl PushRelay for RecordingPushRelay {
    async fn send(
        &self,
        message: &PushMessage,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryFavoriteRepo {
    favorites: Mutex<HashSet<(Uuid, Uuid)>>,
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepo {
    async fn toggle(
        &self,
        user_id: Uuid,
        venue_id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let mut favorites = self.favorites.lock().unwrap();
        if favorites.remove(&(user_id, venue_id)) {
            Ok(false)
        } else {
            favorites.insert((user_id, venue_id));
            Ok(true)
        }
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Uuid>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| *u == user_id)
            .map(|(_, v)| *v)
            .collect())
    }
}

fn test_venue(venue_id: Uuid) -> Venue {
    let schedule = WeeklySchedule::from_compact([
        (Weekday::Monday, "12:00-14:30, 19:00-22:30"),
        (Weekday::Wednesday, "12:00-14:30"),
        (Weekday::Friday, "19:00-23:00"),
    ])
    .unwrap();

    Venue {
        id: venue_id,
        name: "Chez Mimi".to_string(),
        venue_type: "Restaurant".to_string(),
        category: "Bistro".to_string(),
        location: "12 Rue de la République, Marseille".to_string(),
        offer: "Dinner for two against a reel".to_string(),
        photos: vec![],
        push_token: Some("ExponentPushToken[venue-owner]".to_string()),
        schedule,
    }
}

struct TestApp {
    app: axum::Router,
    relay: Arc<RecordingPushRelay>,
    venue_id: Uuid,
}

fn test_app() -> TestApp {
    let venue_id = Uuid::new_v4();
    let relay = Arc::new(RecordingPushRelay::default());

    let state = AppState {
        reservations: Arc::new(InMemoryReservationRepo {
            reservations: Mutex::new(Vec::new()),
        }),
        venues: Arc::new(SingleVenueRepo {
            venue: test_venue(venue_id),
        }),
        favorites: Arc::new(InMemoryFavoriteRepo::default()),
        push: relay.clone(),
        session: Arc::new(AsyncMutex::new(SessionState::new())),
        booking_rules: BookingRules { horizon_days: 90 },
    };

    TestApp {
        app: app(state),
        relay,
        venue_id,
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_availability_dates_skip_closed_weekdays() {
    let t = test_app();

    let response = t
        .app
        .oneshot(
            Request::builder()
                .uri(format!("/v1/venues/{}/availability/dates?horizon=14", t.venue_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let dates = body["dates"].as_array().unwrap();
    // Open three days a week, so two weeks hold at most 6 candidates.
    assert!(!dates.is_empty());
    assert!(dates.len() <= 6);
}

#[tokio::test]
async fn test_availability_slots_for_split_service_day() {
    let t = test_app();

    // 2026-08-31 is a Monday: lunch and dinner service.
    let response = t
        .app
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/v1/venues/{}/availability/slots?date=2026-08-31",
                    t.venue_id
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let slots: Vec<String> = serde_json::from_value(body["slots"].clone()).unwrap();
    assert_eq!(
        slots,
        vec![
            "12:00", "12:30", "13:00", "13:30", "19:00", "19:30", "20:00", "20:30", "21:00",
            "21:30"
        ]
    );
}

#[tokio::test]
async fn test_availability_slots_empty_on_closed_day() {
    let t = test_app();

    // 2026-09-01 is a Tuesday: closed.
    let response = t
        .app
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/v1/venues/{}/availability/slots?date=2026-09-01",
                    t.venue_id
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["slots"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_availability_unknown_venue_is_404() {
    let t = test_app();

    let response = t
        .app
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/v1/venues/{}/availability/dates",
                    Uuid::new_v4()
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_submit_reservation_persists_and_notifies() {
    let t = test_app();
    let requester_id = Uuid::new_v4();

    let payload = serde_json::json!({
        "venue_id": t.venue_id,
        "requester_id": requester_id,
        "requester_name": "Lena",
        "date": "2026-08-31",
        "time": "19:30",
        "guests": "plus_one",
        "content_types": ["reel", "stories_three_to_four"],
        "timeframe": "three_to_seven_days",
        "special_request": "Window table if possible"
    });

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/reservations")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["reservation"]["status"], "pending");
    assert_eq!(body["reservation"]["date"], "31/08/2026");
    assert_eq!(body["reservation"]["time"], "19:30");

    let sent = t.relay.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].token, "ExponentPushToken[venue-owner]");
    assert!(sent[0].body.contains("Lena"));
    drop(sent);

    // The listing sees the persisted record.
    let response = t
        .app
        .oneshot(
            Request::builder()
                .uri(format!("/v1/reservations?requester_id={}", requester_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_submit_incomplete_form_is_rejected() {
    let t = test_app();

    // No time, no content types.
    let payload = serde_json::json!({
        "venue_id": t.venue_id,
        "requester_id": Uuid::new_v4(),
        "requester_name": "Lena",
        "date": "2026-08-31",
        "guests": "solo",
        "timeframe": "one_to_three_days"
    });

    let response = t
        .app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/reservations")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(t.relay.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_status_update_round_trip() {
    let t = test_app();
    let requester_id = Uuid::new_v4();

    let payload = serde_json::json!({
        "venue_id": t.venue_id,
        "requester_id": requester_id,
        "requester_name": "Lena",
        "date": "2026-08-31",
        "time": "12:30",
        "guests": "solo",
        "content_types": ["post"],
        "timeframe": "one_to_three_days"
    });

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/reservations")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    let id: Uuid = serde_json::from_value(body["reservation"]["id"].clone()).unwrap();

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/v1/reservations/{}/status", id))
                .header("content-type", "application/json")
                .body(Body::from(r#"{"status":"confirmed"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = t
        .app
        .oneshot(
            Request::builder()
                .uri(format!("/v1/reservations?requester_id={}", requester_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let listed = body_json(response).await;
    assert_eq!(listed[0]["status"], "confirmed");
}

#[tokio::test]
async fn test_favorite_toggle_round_trip() {
    let t = test_app();
    let user_id = Uuid::new_v4();

    let payload = serde_json::json!({ "user_id": user_id, "venue_id": t.venue_id });
    let toggle = |app: axum::Router| {
        let body = payload.to_string();
        async move {
            app.oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/favorites/toggle")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
        }
    };

    let response = toggle(t.app.clone()).await;
    assert_eq!(body_json(response).await["favorite"], true);

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/v1/favorites/{}", user_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let response = toggle(t.app).await;
    assert_eq!(body_json(response).await["favorite"], false);
}
