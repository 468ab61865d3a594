use crate::pipe::validation::{Violation, Violations};
use std::collections::HashMap;
use std::str::FromStr;

/// Rule name recorded when a parameter cannot be converted to its field type.
pub const TYPE_MISMATCH: &str = "typeMismatch";

/// Query parameters of one request, by name.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    pub fn new(params: HashMap<String, String>) -> Self {
        Self(params)
    }

    /// Raw value of a parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Parse a parameter into `T`.
    ///
    /// Missing and empty parameters bind as `None`. A value that does not
    /// parse also binds as `None` and records a `typeMismatch` violation.
    pub fn parse<T: FromStr>(&self, name: &str, errors: &mut Violations) -> Option<T> {
        let raw = self.get(name)?.trim();
        if raw.is_empty() {
            return None;
        }

        match raw.parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                errors.push(
                    Violation::new(
                        name,
                        TYPE_MISMATCH,
                        format!(
                            "failed to convert value to {}",
                            short_type_name::<T>()
                        ),
                    )
                    .rejected(raw),
                );
                None
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn short_type_name<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

/// A freshly bound value plus the conversion errors met while binding it.
#[derive(Debug)]
pub struct BindingResult<T> {
    pub target: T,
    pub errors: Violations,
}

/// Implemented by types built from query parameters.
pub trait Bind: Sized {
    fn bind(params: &QueryParams) -> BindingResult<Self>;
}
