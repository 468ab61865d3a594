use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Templates compiled into the binary, by view name.
const TEMPLATES: &[(&str, &str)] = &[
    (
        "error-page/404",
        include_str!("../../templates/error-page/404.html"),
    ),
    (
        "error-page/500",
        include_str!("../../templates/error-page/500.html"),
    ),
];

/// A named view, rendered from the embedded templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    name: &'static str,
}

impl View {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn template(&self) -> Option<&'static str> {
        TEMPLATES
            .iter()
            .find(|(name, _)| *name == self.name)
            .map(|(_, template)| *template)
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        match self.template() {
            Some(template) => Html(template).into_response(),
            None => {
                tracing::error!(view = self.name, "view not found");
                (StatusCode::INTERNAL_SERVER_ERROR, "view not found").into_response()
            }
        }
    }
}
