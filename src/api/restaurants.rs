//! Restaurant endpoints
//!
//! CRUD over stored records plus the bulk and sync batch operations.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};

use super::dto::*;
use super::extract::{JsonBody, parse_id};
use crate::AppState;
use crate::data::{Restaurant, RestaurantDraft};
use crate::error::AppError;

/// Create restaurants router
///
/// Routes:
/// - GET /restaurants - List all restaurants
/// - POST /restaurants - Create a restaurant
/// - DELETE /restaurants - Delete every restaurant
/// - POST /restaurants/bulk - Insert many, optionally replacing
/// - GET /restaurants/:id - Get one restaurant
/// - PUT /restaurants/:id - Replace one restaurant's fields
/// - DELETE /restaurants/:id - Delete one restaurant
/// - POST /sync - Replace the whole dataset
pub fn restaurants_router() -> Router<AppState> {
    Router::new()
        .route(
            "/restaurants",
            get(list_restaurants)
                .post(create_restaurant)
                .delete(delete_all_restaurants),
        )
        .route("/restaurants/bulk", post(bulk_create_restaurants))
        .route(
            "/restaurants/:id",
            get(get_restaurant)
                .put(update_restaurant)
                .delete(delete_restaurant),
        )
        .route("/sync", post(sync_restaurants))
}

/// GET /restaurants
async fn list_restaurants(State(state): State<AppState>) -> Result<Json<ListResponse>, AppError> {
    let listing = state.restaurants.list().await?;

    Ok(Json(ListResponse {
        data: listing.restaurants,
        error: (!listing.storage_available).then(|| AppError::StorageUnavailable.to_string()),
    }))
}

/// GET /restaurants/:id
async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Restaurant>>, AppError> {
    let restaurant = state.restaurants.get(parse_id(&id)?).await?;
    Ok(Json(DataResponse::new(restaurant)))
}

/// POST /restaurants
async fn create_restaurant(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<RestaurantDraft>,
) -> Result<(StatusCode, Json<DataResponse<Restaurant>>), AppError> {
    let restaurant = state.restaurants.create(&draft).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(restaurant))))
}

/// POST /restaurants/bulk
async fn bulk_create_restaurants(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<BulkCreateRequest>,
) -> Result<(StatusCode, Json<DataResponse<CountData>>), AppError> {
    let count = state
        .restaurants
        .bulk_create(&req.restaurants, req.replace)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            CountData { count },
            format!("{count} restaurants added"),
        )),
    ))
}

/// PUT /restaurants/:id
async fn update_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(draft): JsonBody<RestaurantDraft>,
) -> Result<Json<DataResponse<Restaurant>>, AppError> {
    let restaurant = state.restaurants.update(parse_id(&id)?, &draft).await?;
    Ok(Json(DataResponse::new(restaurant)))
}

/// DELETE /restaurants/:id
async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<DeletedData>>, AppError> {
    let id = parse_id(&id)?;
    state.restaurants.delete_one(id).await?;
    Ok(Json(DataResponse::with_message(DeletedData { id }, "Deleted")))
}

/// DELETE /restaurants
async fn delete_all_restaurants(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<CountData>>, AppError> {
    let count = state.restaurants.delete_all().await?;
    Ok(Json(DataResponse::with_message(
        CountData { count },
        "All deleted",
    )))
}

/// POST /sync
///
/// Makes the submitted dataset the only stored one.
async fn sync_restaurants(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SyncRequest>,
) -> Result<Json<DataResponse<CountData>>, AppError> {
    let count = state.sync.sync(&req.restaurants).await?;
    Ok(Json(DataResponse::with_message(
        CountData { count },
        format!("Synced {count} restaurants"),
    )))
}
