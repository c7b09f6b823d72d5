use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct DeletedDoc { pub message: String, pub id: i32 }

#[derive(ToSchema)]
pub struct VideoDoc { pub id: i32, pub name: String, pub views: i64, pub likes: i64 }

#[derive(ToSchema)]
pub struct VideoInputDoc { pub name: String, pub views: i64, pub likes: i64 }

#[derive(ToSchema)]
pub struct VideoPatchDoc { pub name: Option<String>, pub views: Option<i64>, pub likes: Option<i64> }

#[derive(ToSchema)]
pub struct PersonDoc { pub age: u32, pub gender: String }

#[derive(ToSchema)]
pub struct TaskDoc { pub id: i32, pub name: String }

#[derive(ToSchema)]
pub struct TaskInputDoc { pub name: String }

#[derive(ToSchema)]
pub struct CafeDoc {
    pub id: i32,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<f64>,
}

/// Form fields accepted by `POST /add_cafe`; amenity flags are optional.
#[derive(ToSchema)]
pub struct NewCafeFormDoc {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub coffee_price: String,
    pub has_toilet: Option<String>,
    pub has_wifi: Option<String>,
    pub has_sockets: Option<String>,
    pub can_take_calls: Option<String>,
}

#[derive(ToSchema)]
pub struct CafeEnvelopeDoc { pub cafe: CafeDoc }

#[derive(ToSchema)]
pub struct CafeListDoc { pub cafes: Vec<CafeDoc> }

#[derive(ToSchema)]
pub struct CafeCreatedDoc { pub cafe: CafeDoc }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::videos::get_video,
        crate::routes::videos::put_video,
        crate::routes::videos::patch_video,
        crate::routes::videos::delete_video,
        crate::routes::videos::get_person,
        crate::routes::videos::post_person,
    ),
    components(schemas(HealthResponse, DeletedDoc, VideoDoc, VideoInputDoc, VideoPatchDoc, PersonDoc)),
    tags((name = "health"), (name = "videos"), (name = "people"))
)]
pub struct VideoApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::tasks::list_tasks,
        crate::routes::tasks::create_task,
        crate::routes::tasks::get_task,
        crate::routes::tasks::update_task,
        crate::routes::tasks::delete_task,
    ),
    components(schemas(HealthResponse, DeletedDoc, TaskDoc, TaskInputDoc)),
    tags((name = "health"), (name = "tasks"))
)]
pub struct TaskApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::cafes::index,
        crate::routes::cafes::random_cafe,
        crate::routes::cafes::all_cafes,
        crate::routes::cafes::search,
        crate::routes::cafes::add_cafe,
        crate::routes::cafes::update_price,
        crate::routes::cafes::delete_cafe,
        crate::routes::cafes::insert_sample_data,
    ),
    components(schemas(
        HealthResponse,
        DeletedDoc,
        CafeDoc,
        NewCafeFormDoc,
        CafeEnvelopeDoc,
        CafeListDoc,
        CafeCreatedDoc,
    )),
    tags((name = "health"), (name = "cafes"))
)]
pub struct CafeApiDoc;
