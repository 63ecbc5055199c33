// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the booking API.

use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tabletop_core::time::parse_date_time;
use tabletop_core::{
    Booking, BookingId, BookingRequest, BookingStatus, ConfirmedBooking, HealthStatus, NewUser,
    Restaurant, RestaurantFilter, RestaurantId, User, UserId,
};

use crate::error::ApiError;
use crate::server::ApiState;

/// Response body for GET /health.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` when every component is healthy, `degraded` otherwise.
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub components: Vec<ComponentHealth>,
}

/// Health of one component.
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// A restaurant plus whether it can be booked online.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantView {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub booking_enabled: bool,
}

/// Query for PUT /api/bookings/{id}/status.
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: String,
}

/// Query for GET /api/bookings/availability.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub restaurant_id: i64,
    pub booking_date_time: String,
}

/// GET /health
pub async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    let mut components = Vec::with_capacity(state.components.len());
    let mut all_healthy = true;

    for component in &state.components {
        let (status, detail) = match component.health_check().await {
            Ok(HealthStatus::Healthy) => ("healthy", None),
            Ok(HealthStatus::Degraded(reason)) => ("degraded", Some(reason)),
            Ok(HealthStatus::Unhealthy(reason)) => ("unhealthy", Some(reason)),
            Err(e) => ("unhealthy", Some(e.to_string())),
        };
        if status != "healthy" {
            all_healthy = false;
        }
        components.push(ComponentHealth {
            name: component.name().to_string(),
            status: status.to_string(),
            detail,
        });
    }

    Json(HealthResponse {
        status: if all_healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        components,
    })
}

/// GET /api/restaurants
pub async fn list_restaurants(
    State(state): State<ApiState>,
    Query(filter): Query<RestaurantFilter>,
) -> Result<Json<Vec<RestaurantView>>, ApiError> {
    let restaurants = state.restaurants.list_restaurants(&filter).await?;
    let views = restaurants
        .into_iter()
        .map(|restaurant| view(&state, restaurant))
        .collect();
    Ok(Json(views))
}

/// GET /api/restaurants/{id}
pub async fn get_restaurant(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<RestaurantView>, ApiError> {
    let restaurant = state
        .restaurants
        .get_restaurant(RestaurantId(id))
        .await?
        .ok_or_else(|| not_found("restaurant", id))?;
    Ok(Json(view(&state, restaurant)))
}

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<ApiState>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<ConfirmedBooking>, ApiError> {
    let confirmed = state.bookings.create_booking(&request).await?;
    Ok(Json(confirmed))
}

/// GET /api/bookings
pub async fn list_bookings(State(state): State<ApiState>) -> Result<Json<Vec<Booking>>, ApiError> {
    Ok(Json(state.bookings.list_bookings().await?))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, ApiError> {
    Ok(Json(state.bookings.get_booking(BookingId(id)).await?))
}

/// GET /api/bookings/user/{id}
pub async fn list_user_bookings(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    Ok(Json(state.bookings.list_user_bookings(UserId(id)).await?))
}

/// GET /api/bookings/restaurant/{id}
pub async fn list_restaurant_bookings(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    Ok(Json(
        state
            .bookings
            .list_restaurant_bookings(RestaurantId(id))
            .await?,
    ))
}

/// PUT /api/bookings/{id}/status?status=
pub async fn update_booking_status(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Booking>, ApiError> {
    let status = BookingStatus::from_str(query.status.trim())
        .map_err(|_| ApiError::BadRequest(format!("unknown booking status `{}`", query.status)))?;
    Ok(Json(
        state.bookings.update_status(BookingId(id), status).await?,
    ))
}

/// DELETE /api/bookings/{id}
pub async fn cancel_booking(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, ApiError> {
    Ok(Json(state.bookings.cancel_booking(BookingId(id)).await?))
}

/// GET /api/bookings/availability?restaurantId=&bookingDateTime=
pub async fn check_availability(
    State(state): State<ApiState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<bool>, ApiError> {
    let at = parse_date_time(&query.booking_date_time).ok_or_else(|| {
        ApiError::BadRequest(format!("invalid date-time `{}`", query.booking_date_time))
    })?;
    let available = state
        .bookings
        .is_time_slot_available(RestaurantId(query.restaurant_id), at)
        .await?;
    Ok(Json(available))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<ApiState>,
    Json(body): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let new_user = NewUser {
        name: body.name.trim().to_string(),
        email: body.email.trim().to_string(),
    };
    if new_user.name.is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".to_string()));
    }
    if !new_user.email.contains('@') {
        return Err(ApiError::BadRequest(format!(
            "invalid email address `{}`",
            new_user.email
        )));
    }

    let user = state.users.create_user(&new_user).await?;
    tracing::info!(user_id = %user.id, "registered user");
    Ok((StatusCode::CREATED, Json(user)))
}

fn view(state: &ApiState, restaurant: Restaurant) -> RestaurantView {
    let booking_enabled = state.endpoints.contains(restaurant.id);
    RestaurantView {
        restaurant,
        booking_enabled,
    }
}

fn not_found(entity: &'static str, id: i64) -> ApiError {
    ApiError::Booking(tabletop_core::BookingError::NotFound {
        entity,
        id: id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restaurant_view_flattens_fields() {
        let restaurant = Restaurant {
            id: RestaurantId(3),
            name: "Galle Fort Seafood".to_string(),
            description: String::new(),
            address: String::new(),
            city: "Galle".to_string(),
            cuisine: "Seafood".to_string(),
            rating: 4.2,
            price_range: 3,
            phone_number: None,
            website: None,
            image_url: None,
            is_active: true,
        };
        let json = serde_json::to_value(RestaurantView {
            restaurant,
            booking_enabled: true,
        })
        .unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["priceRange"], 3);
        assert_eq!(json["bookingEnabled"], true);
    }

    #[test]
    fn availability_query_uses_camel_case() {
        let query: AvailabilityQuery = serde_json::from_value(serde_json::json!({
            "restaurantId": 1,
            "bookingDateTime": "2030-01-01T19:00"
        }))
        .unwrap();
        assert_eq!(query.restaurant_id, 1);
    }
}
