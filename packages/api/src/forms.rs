// ABOUTME: Urlencoded form extraction that keeps repeated keys
// ABOUTME: Field lookup helpers and the editor actions decoded from submitted forms

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Shown when a recognised action arrives without one of its fields
pub const INCOMPLETE_FORM: &str = "The submitted form was incomplete. Nothing was changed.";

/// Shown when a pizza editor form names a topping that does not exist
pub const UNKNOWN_TOPPING_EDIT: &str = "You have attempted to alter a topping that does not exist.";

/// Shown when the pizza create form names a topping that does not exist
pub const UNKNOWN_TOPPING_CREATE: &str =
    "You have attempted to add a topping that does not exist. No pizza created.";

/// Problems with a submitted form's fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("missing form field: {0}")]
    Missing(&'static str),
}

/// Decoded `application/x-www-form-urlencoded` body in submission order
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(body: &[u8]) -> Self {
        Self {
            fields: url::form_urlencoded::parse(body).into_owned().collect(),
        }
    }

    /// True when the key was submitted at all, with any value
    pub fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// First value submitted for the key
    pub fn value(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn require(&self, key: &'static str) -> Result<&str, FormError> {
        self.value(key).ok_or(FormError::Missing(key))
    }

    /// Every non-empty value submitted under the key, in order; possibly none
    pub fn selected(&self, key: &'static str) -> Vec<String> {
        self.values(key)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Like `selected`, but at least one value must be present
    pub fn required_values(&self, key: &'static str) -> Result<Vec<String>, FormError> {
        let values = self.selected(key);
        if values.is_empty() {
            return Err(FormError::Missing(key));
        }
        Ok(values)
    }
}

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Ok(Self::parse(&body))
    }
}

/// An action requested from the topping editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToppingEditAction {
    Rename { new_name: String },
    Delete,
}

impl ToppingEditAction {
    /// Decode the first recognised action. `Ok(None)` when the form names none.
    pub fn from_form(form: &FormData) -> Result<Option<Self>, FormError> {
        if form.contains("topping_name_change") {
            let new_name = form.require("new_name")?.to_string();
            return Ok(Some(ToppingEditAction::Rename { new_name }));
        }

        if form.contains("topping_delete") {
            return Ok(Some(ToppingEditAction::Delete));
        }

        Ok(None)
    }
}

/// An action requested from the pizza editor. Toppings are referenced by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PizzaEditAction {
    Rename { new_name: String },
    Delete,
    AddToppings { toppings: Vec<String> },
    RemoveTopping { topping: String },
    ReplaceTopping { prior: String, toppings: Vec<String> },
}

impl PizzaEditAction {
    /// Decode the first recognised action. `Ok(None)` when the form names none.
    pub fn from_form(form: &FormData) -> Result<Option<Self>, FormError> {
        if form.contains("pizza_name_change") {
            let new_name = form.require("new_name")?.to_string();
            return Ok(Some(PizzaEditAction::Rename { new_name }));
        }

        if form.contains("pizza_delete") {
            return Ok(Some(PizzaEditAction::Delete));
        }

        if form.contains("pizza_topping_add") {
            let toppings = form.required_values("toppings_options")?;
            return Ok(Some(PizzaEditAction::AddToppings { toppings }));
        }

        if form.contains("pizza_topping_delete") {
            let topping = form.require("deleted_topping")?.to_string();
            return Ok(Some(PizzaEditAction::RemoveTopping { topping }));
        }

        if form.contains("pizza_topping_change") {
            let prior = form.require("prior_topping")?.to_string();
            let toppings = form.required_values("toppings_options")?;
            return Ok(Some(PizzaEditAction::ReplaceTopping { prior, toppings }));
        }

        Ok(None)
    }
}
