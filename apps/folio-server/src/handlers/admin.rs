//! Admin authoring endpoints. Every route requires a signed-in [`Identity`].

use actix_web::{HttpRequest, HttpResponse, http::header, web};
use chrono::Utc;
use serde::Deserialize;

use folio_core::domain::PostForm;
use folio_core::ports::{UploadFile, upload_path};
use folio_core::views::{
    POST_DELETE_FAILED, POST_PUBLISH_FAILED, POST_PUBLISHED, POST_UPDATE_FAILED, POST_UPDATED,
};
use folio_shared::ApiResponse;
use folio_shared::dto::{CreatedResponse, PostFormRequest, UploadResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_form(request: PostFormRequest) -> Result<PostForm, AppError> {
    let form = PostForm {
        title: request.title,
        excerpt: request.excerpt,
        content: request.content,
        category: request.category,
        tags: request.tags,
        image: request.image,
        date: request.date,
    };
    form.validate()?;
    Ok(form)
}

/// POST /api/admin/posts
pub async fn create_post(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<PostFormRequest>,
) -> AppResult<HttpResponse> {
    let form = post_form(body.into_inner())?;
    let id = state
        .repo
        .create_post(form, identity.user.author_name())
        .await
        .map_err(|e| AppError::content(e, POST_PUBLISH_FAILED))?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        CreatedResponse { id },
        POST_PUBLISHED,
    )))
}

/// PUT /api/admin/posts/{id}
pub async fn update_post(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostFormRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = post_form(body.into_inner())?;
    state
        .repo
        .update_post(&id, form)
        .await
        .map_err(|e| AppError::content(e, POST_UPDATE_FAILED))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        CreatedResponse { id },
        POST_UPDATED,
    )))
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// DELETE /api/admin/posts/{id}?confirm=true
///
/// Without the confirmation flag nothing reaches the store.
pub async fn delete_post(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<DeleteQuery>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if !query.confirm {
        return Err(AppError::BadRequest(
            "Deleting a post must be confirmed with confirm=true".to_string(),
        ));
    }

    state
        .repo
        .delete_post(&id)
        .await
        .map_err(|e| AppError::content(e, POST_DELETE_FAILED))?;

    Ok(HttpResponse::NoContent().finish())
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

/// POST /api/admin/uploads?filename=
///
/// The request body is the raw file. Returns the URL to embed in content.
pub async fn upload_image(
    _identity: Identity,
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let file = UploadFile {
        file_name: query.into_inner().filename,
        content_type,
        bytes: body.to_vec(),
    };
    let path = upload_path(&file.file_name, Utc::now());
    let url = state.storage.upload(&path, file).await?;

    Ok(HttpResponse::Created().json(UploadResponse { url }))
}
