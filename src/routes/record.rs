//! `bookBank` route handlers
//!
//! Success responses are short plain-text messages, except the listing which
//! is a JSON array.

use crate::error::{not_found_error, validation_error, ApiResult};
use crate::models::{Record, RecordInput};
use crate::state::SharedState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use tracing::{debug, info};

/// Create the `bookBank` table if it does not exist yet
pub async fn create_table(State(state): State<SharedState>) -> ApiResult<&'static str> {
    state.store.create_table().await?;

    info!("bookBank table is ready");
    Ok("Table created successfully")
}

/// List every record
pub async fn list_records(State(state): State<SharedState>) -> ApiResult<Json<Vec<Record>>> {
    let records = state.store.list().await?;

    debug!("Listed {} records", records.len());
    Ok(Json(records))
}

/// Insert a new record
pub async fn create_record(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, &'static str)> {
    let record = RecordInput::from_body(content_type(&headers), &body)?.validated()?;

    let id = state.store.insert(&record).await?;

    info!("Inserted record {}", id);
    Ok((StatusCode::CREATED, "Data inserted successfully"))
}

/// Replace the question and answer of an existing record
pub async fn update_record(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<&'static str> {
    let record = RecordInput::from_body(content_type(&headers), &body)?.validated()?;

    let id = id.trim();
    if id.is_empty() {
        return Err(validation_error("ID is required."));
    }

    // An id that is not an integer cannot match any row
    let Ok(id) = id.parse::<i32>() else {
        debug!("Update target '{}' is not a valid id", id);
        return Err(not_found_error("Record not found."));
    };

    if state.store.update(id, &record).await? == 0 {
        return Err(not_found_error("Record not found."));
    }

    info!("Updated record {}", id);
    Ok("Data updated successfully")
}

/// Delete a record.
///
/// Deleting an id with no matching row answers exactly like a real delete;
/// unlike update, a miss is not reported.
pub async fn delete_record(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<&'static str> {
    match id.trim().parse::<i32>() {
        Ok(id) => {
            let affected = state.store.delete(id).await?;
            info!("Delete of record {} removed {} row(s)", id, affected);
        }
        Err(_) => {
            // No row can match, but a missing table still reports a failure
            state.store.table_ready().await?;
            debug!("Delete target '{}' is not a valid id, nothing to remove", id);
        }
    }

    Ok("Data deleted successfully")
}

fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
}
