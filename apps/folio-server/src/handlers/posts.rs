//! Public blog endpoints.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use folio_core::domain::Post;
use folio_core::views::{CategoryFilter, DetailState, POST_NOT_FOUND, PostDetailView, PostListView};
use folio_shared::dto::{CategoryCount, PostDetail, PostListResponse, PostSummary};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

fn summary(post: &Post, preview: String) -> PostSummary {
    PostSummary {
        id: post.id.clone(),
        title: post.title.clone(),
        excerpt: post.excerpt.clone(),
        preview,
        category: post.category.clone(),
        tags: post.tags.clone(),
        author: post.author.clone(),
        date: post.date,
        image: post.image.clone(),
    }
}

fn detail(post: Post) -> PostDetail {
    PostDetail {
        id: post.id,
        title: post.title,
        excerpt: post.excerpt,
        content: post.content,
        category: post.category,
        tags: post.tags,
        author: post.author,
        date: post.date,
        image: post.image,
    }
}

/// GET /api/posts?category=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let mut view = PostListView::new(state.repo.clone()).with_preview_chars(state.preview_chars);
    view.load().await;
    if let Some(message) = view.error() {
        return Err(AppError::Unavailable(message.to_string()));
    }

    let filter = CategoryFilter::parse(query.category.as_deref());
    view.set_filter(filter.clone());

    let response = PostListResponse {
        category: match filter {
            CategoryFilter::All => None,
            CategoryFilter::Category(name) => Some(name),
        },
        categories: view
            .categories()
            .into_iter()
            .map(|c| CategoryCount {
                category: c.category,
                count: c.count,
            })
            .collect(),
        posts: view
            .visible()
            .into_iter()
            .map(|post| summary(post, view.preview(post)))
            .collect(),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut view = PostDetailView::new(state.repo.clone());
    view.open(&id).await;

    match view.state().clone() {
        DetailState::Loaded(post) => Ok(HttpResponse::Ok().json(detail(post))),
        DetailState::NotFound => Err(AppError::NotFound(POST_NOT_FOUND.to_string())),
        DetailState::Failed(message) => Err(AppError::Unavailable(message)),
        DetailState::Loading => Err(AppError::Internal("post fetch did not settle".to_string())),
    }
}
