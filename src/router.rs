//! Request routing
//!
//! Requests under the movie route prefix are answered from the movie cache;
//! everything else is treated as a static asset path.

use std::sync::Arc;

use crate::error::{AssetError, LookupError};
use crate::http::mime::FALLBACK_CONTENT_TYPE;
use crate::http::parser::parse_request_line;
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::movies::{MovieCache, MovieProvider};
use crate::static_files::StaticFiles;

/// Cache key used when a movie request carries no `title` parameter.
///
/// The provider is still consulted with it, so the client gets whatever the
/// provider says about an empty title.
pub const MISSING_TITLE: &str = "";

pub struct Router<P> {
    movies: Arc<MovieCache<P>>,
    assets: StaticFiles,
    movie_prefix: String,
}

impl<P: MovieProvider> Router<P> {
    pub fn new(movies: Arc<MovieCache<P>>, assets: StaticFiles, movie_prefix: impl Into<String>) -> Self {
        Self {
            movies,
            assets,
            movie_prefix: movie_prefix.into(),
        }
    }

    pub fn movies(&self) -> &MovieCache<P> {
        &self.movies
    }

    /// Parses a raw request line and routes it.
    pub async fn respond(&self, line: &str) -> Response {
        match parse_request_line(line) {
            Ok(request) => self.handle(&request).await,
            Err(e) => {
                tracing::warn!(line = %line, error = %e, "Rejecting request line");
                Response::bad_request()
            }
        }
    }

    pub async fn handle(&self, request: &Request) -> Response {
        if !request.method.is_routable() {
            tracing::debug!(method = ?request.method, path = %request.path, "Method not allowed");
            return Response::error(StatusCode::MethodNotAllowed);
        }

        let response = if request.path.starts_with(&self.movie_prefix) {
            self.lookup_movie(request).await
        } else {
            self.serve_asset(&request.path).await
        };

        tracing::info!(
            method = ?request.method,
            path = %request.path,
            status = response.status.as_u16(),
            "Request handled"
        );

        response
    }

    async fn lookup_movie(&self, request: &Request) -> Response {
        let title = request.title().unwrap_or(MISSING_TITLE);

        match self.movies.get(title).await {
            Ok(body) => Response::json(body),
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "Movie lookup failed");
                match e {
                    LookupError::Timeout => Response::error(StatusCode::GatewayTimeout),
                    _ => Response::error(StatusCode::BadGateway),
                }
            }
        }
    }

    async fn serve_asset(&self, path: &str) -> Response {
        match self.assets.read(path).await {
            Ok(asset) => {
                let content_type = if asset.content_type.is_empty() {
                    FALLBACK_CONTENT_TYPE
                } else {
                    asset.content_type
                };
                Response::ok(content_type, asset.body)
            }
            Err(AssetError::NotFound(_)) => {
                tracing::debug!(path = %path, "Asset not found");
                Response::not_found()
            }
            Err(e) => {
                tracing::error!(path = %path, error = %e, "Failed to read asset");
                Response::internal_error()
            }
        }
    }
}
