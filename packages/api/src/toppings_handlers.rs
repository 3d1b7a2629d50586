// ABOUTME: HTTP request handlers for the topping pages
// ABOUTME: Overview, editor (rename and delete), and creation through HTML forms

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use tracing::{info, warn};

use pizzeria_core::{EntityKind, Outcome};
use pizzeria_toppings::{Topping, ToppingCreateInput};

use crate::db::DbState;
use crate::error::{parse_item_id, AppError};
use crate::forms::{FormData, ToppingEditAction, INCOMPLETE_FORM};
use crate::pagination::{PageQuery, PageRequest, TOPPINGS_PER_PAGE};
use crate::paths;
use crate::response::found;
use crate::views;

/// Paginated list of every topping
pub async fn toppings_overview(
    State(db): State<DbState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    info!("Listing toppings (page: {:?})", query.page);

    let total = db.topping_storage.count_toppings().await?;
    let meta = PageRequest::parse(query.page.as_deref())?.resolve(total, TOPPINGS_PER_PAGE)?;

    let (toppings, _) = db
        .topping_storage
        .list_toppings_paginated(Some(meta.page_size), Some(meta.offset()))
        .await?;

    Ok(Html(views::toppings::overview(&toppings, &meta)))
}

/// Editor page for one topping
pub async fn topping_editor(
    State(db): State<DbState>,
    Path(topping_id): Path<String>,
) -> Result<Html<String>, AppError> {
    info!("Showing topping editor: {}", topping_id);

    let topping = db
        .topping_storage
        .get_topping(parse_item_id(&topping_id)?)
        .await?;

    Ok(Html(views::toppings::editor(&topping, None)))
}

/// Apply the action submitted from the topping editor
pub async fn update_topping(
    State(db): State<DbState>,
    Path(topping_id): Path<String>,
    form: FormData,
) -> Result<Response, AppError> {
    let topping = db
        .topping_storage
        .get_topping(parse_item_id(&topping_id)?)
        .await?;

    let action = match ToppingEditAction::from_form(&form) {
        Ok(Some(action)) => action,
        Ok(None) => return Ok(found(&paths::topping_editor(topping.id))),
        Err(e) => {
            warn!("Incomplete topping form for {}: {}", topping.id, e);
            return Ok(rerender_editor(&topping, INCOMPLETE_FORM));
        }
    };

    let result = match action {
        ToppingEditAction::Rename { new_name } => {
            info!("Renaming topping {} to {}", topping.id, new_name);
            db.topping_storage
                .rename_topping(topping.id, &new_name)
                .await
                .map(|_| ())
        }
        ToppingEditAction::Delete => {
            info!("Deleting topping: {}", topping.id);
            db.topping_storage.delete_topping(topping.id).await
        }
    };

    match result {
        Ok(()) => Ok(found(paths::TOPPINGS_OVERVIEW)),
        Err(e) => match e.name_rejection() {
            Some(rejection) => {
                info!("Rejected topping rename for {}: {}", topping.id, rejection);
                let message = rejection.message(EntityKind::Topping, Outcome::Rename);
                Ok(rerender_editor(&topping, &message))
            }
            None => Err(e.into()),
        },
    }
}

fn rerender_editor(topping: &Topping, message: &str) -> Response {
    Html(views::toppings::editor(topping, Some(message))).into_response()
}

/// Blank topping create form
pub async fn new_topping_form() -> Html<String> {
    Html(views::toppings::create_form("", None))
}

/// Create a topping from the submitted form
pub async fn create_topping(
    State(db): State<DbState>,
    form: FormData,
) -> Result<Response, AppError> {
    let Some(name) = form.value("new_topping_name") else {
        warn!("Topping create form without a name");
        return Ok(Html(views::toppings::create_form("", Some(INCOMPLETE_FORM))).into_response());
    };

    info!("Creating topping: {}", name);

    let input = ToppingCreateInput {
        name: name.to_string(),
    };

    match db.topping_storage.create_topping(input).await {
        Ok(_) => Ok(found(paths::TOPPINGS_OVERVIEW)),
        Err(e) => match e.name_rejection() {
            Some(rejection) => {
                info!("Rejected new topping {}: {}", name, rejection);
                let message = rejection.message(EntityKind::Topping, Outcome::Create);
                Ok(Html(views::toppings::create_form(name, Some(&message))).into_response())
            }
            None => Err(e.into()),
        },
    }
}
