use crate::pipe::{Bind, Pipe, PipeError, QueryParams, Validate, ValidationPipe};
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

/// Extractor that binds `T` from the query string and validates it.
///
/// The handler only runs when binding and every constraint succeed;
/// otherwise the request is answered with a 400 listing the violations.
///
/// ```rust,ignore
/// async fn create(Valid(item): Valid<Item>) -> &'static str {
///     "ok"
/// }
/// ```
#[derive(Debug)]
pub struct Valid<T>(pub T);

impl<S, T> FromRequestParts<S> for Valid<T>
where
    T: Bind + Validate + Send + 'static,
    S: Send + Sync,
{
    type Rejection = PipeError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map_err(|e| PipeError::Transformation(e.body_text()))?;

        let bound = T::bind(&QueryParams::new(params));
        let target = ValidationPipe::<T>::new().transform(bound).await?;
        Ok(Valid(target))
    }
}
