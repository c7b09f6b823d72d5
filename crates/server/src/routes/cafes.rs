use std::collections::HashMap;

use axum::{
    extract::{rejection::{FormRejection, PathRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    response::Html,
    routing::{delete, get, patch, post},
    Form, Json, Router,
};
use serde_json::{json, Value};

use models::cafe;
use service::cafe::{form, CafeService};

use crate::errors::ApiError;

type Params = HashMap<String, String>;

#[utoipa::path(get, path = "/", tag = "cafes",
    responses((status = 200, description = "HTML listing of every cafe", content_type = "text/html")))]
pub async fn index(State(cafes): State<CafeService>) -> Result<Html<String>, ApiError> {
    Ok(Html(render_index(&cafes.list().await?)))
}

#[utoipa::path(get, path = "/random", tag = "cafes",
    responses((status = 200, description = "OK", body = crate::openapi::CafeEnvelopeDoc), (status = 404, description = "Directory is empty")))]
pub async fn random_cafe(State(cafes): State<CafeService>) -> Result<Json<Value>, ApiError> {
    let cafe = cafes.random().await?;
    Ok(Json(json!({"cafe": cafe})))
}

#[utoipa::path(get, path = "/all_cafes", tag = "cafes",
    responses((status = 200, description = "OK", body = crate::openapi::CafeListDoc)))]
pub async fn all_cafes(State(cafes): State<CafeService>) -> Result<Json<Value>, ApiError> {
    Ok(Json(json!({"cafes": cafes.list().await?})))
}

#[utoipa::path(get, path = "/search", tag = "cafes",
    params(("location" = String, Query, description = "Exact, case-sensitive location")),
    responses((status = 200, description = "Matches, possibly empty", body = crate::openapi::CafeListDoc), (status = 400, description = "Missing location")))]
pub async fn search(
    State(cafes): State<CafeService>,
    query: Result<Query<Params>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = query?;
    let location = params
        .get("location")
        .map(String::as_str)
        .filter(|l| !l.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing required parameter: location."))?;

    let found = cafes.search(location).await?;
    if found.is_empty() {
        return Ok(Json(json!({
            "cafes": [],
            "error": {"Not Found": "Sorry, we don't have a cafe at that location."}
        })));
    }
    Ok(Json(json!({"cafes": found})))
}

#[utoipa::path(post, path = "/add_cafe", tag = "cafes",
    request_body(content = crate::openapi::NewCafeFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses((status = 201, description = "Created", body = crate::openapi::CafeCreatedDoc), (status = 400, description = "Bad Request"), (status = 409, description = "Duplicate name"), (status = 500, description = "Store failure, rolled back")))]
pub async fn add_cafe(
    State(cafes): State<CafeService>,
    body: Result<Form<form::FormFields>, FormRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Form(fields) = body?;
    let new = form::parse_new_cafe(&fields)?;
    let created = cafes.add(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "response": {"success": "Successfully added the new cafe."},
            "cafe": created
        })),
    ))
}

#[utoipa::path(patch, path = "/update-price/{id}", tag = "cafes",
    params(("id" = i32, Path, description = "Cafe id"), ("new_price" = f64, Query, description = "New coffee price")),
    responses((status = 200, description = "OK"), (status = 400, description = "Missing or invalid price"), (status = 404, description = "Cafe not found.")))]
pub async fn update_price(
    State(cafes): State<CafeService>,
    id: Result<Path<i32>, PathRejection>,
    query: Result<Query<Params>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let Query(params) = query?;
    let price = form::parse_new_price(params.get("new_price").map(String::as_str))?;
    let updated = cafes.update_price(id, price).await?;
    Ok(Json(json!({
        "success": "Successfully updated the cafe price.",
        "new_price": updated.coffee_price
    })))
}

#[utoipa::path(delete, path = "/delete/{id}", tag = "cafes",
    params(("id" = i32, Path, description = "Cafe id"), ("api-key" = String, Query, description = "Shared secret")),
    responses((status = 200, description = "Deleted", body = crate::openapi::DeletedDoc), (status = 403, description = "Forbidden: Invalid API key."), (status = 404, description = "Not Found")))]
pub async fn delete_cafe(
    State(cafes): State<CafeService>,
    id: Result<Path<i32>, PathRejection>,
    query: Result<Query<Params>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let Query(params) = query?;
    cafes.delete(id, params.get("api-key").map(String::as_str)).await?;
    Ok(Json(json!({"message": "Cafe deleted successfully", "id": id})))
}

#[utoipa::path(get, path = "/insert-sample-data", tag = "cafes",
    responses((status = 200, description = "Samples inserted")))]
pub async fn insert_sample_data(State(cafes): State<CafeService>) -> Result<Json<Value>, ApiError> {
    let inserted = cafes.insert_sample_data().await?;
    Ok(Json(json!({"message": "Sample data inserted successfully!", "inserted": inserted})))
}

pub fn router(cafes: CafeService) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/random", get(random_cafe))
        .route("/all_cafes", get(all_cafes))
        .route("/search", get(search))
        .route("/add_cafe", post(add_cafe))
        .route("/update-price/:id", patch(update_price))
        .route("/delete/:id", delete(delete_cafe))
        .route("/insert-sample-data", get(insert_sample_data))
        .with_state(cafes)
}

fn render_index(cafes: &[cafe::Model]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Cafes</title></head>\n<body>\n<h1>Cafes</h1>\n",
    );
    if cafes.is_empty() {
        html.push_str("<p>No cafes yet.</p>\n");
    } else {
        html.push_str("<table>\n<tr><th>Name</th><th>Location</th><th>Seats</th><th>Amenities</th><th>Coffee</th><th>Links</th></tr>\n");
        for c in cafes {
            let price = c.coffee_price.map(|p| format!("£{p:.2}")).unwrap_or_else(|| "-".into());
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><a href=\"{}\">map</a> <a href=\"{}\">photo</a></td></tr>\n",
                escape_html(&c.name),
                escape_html(&c.location),
                escape_html(&c.seats),
                amenities(c),
                price,
                escape_html(&c.map_url),
                escape_html(&c.img_url),
            ));
        }
        html.push_str("</table>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn amenities(c: &cafe::Model) -> String {
    let flags = [
        (c.has_toilet, "toilet"),
        (c.has_wifi, "wifi"),
        (c.has_sockets, "sockets"),
        (c.can_take_calls, "calls"),
    ];
    let names: Vec<&str> = flags.iter().filter(|(on, _)| *on).map(|(_, n)| *n).collect();
    if names.is_empty() { "-".into() } else { names.join(", ") }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<b>\"Tom & Jerry's\"</b>"), "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;");
    }

    #[test]
    fn empty_listing_renders_placeholder() {
        let page = render_index(&[]);
        assert!(page.contains("No cafes yet."));
        assert!(!page.contains("<table>"));
    }
}
