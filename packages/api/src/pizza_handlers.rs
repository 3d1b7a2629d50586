// ABOUTME: HTTP request handlers for the pizza pages
// ABOUTME: Overview, editor (name and topping changes), and creation through HTML forms

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use tracing::{debug, info, warn};

use pizzeria_core::{EntityKind, Outcome};
use pizzeria_pizzas::{Pizza, PizzaCreateInput};
use pizzeria_storage::StorageError;

use crate::db::DbState;
use crate::error::{parse_item_id, AppError};
use crate::forms::{
    FormData, PizzaEditAction, INCOMPLETE_FORM, UNKNOWN_TOPPING_CREATE, UNKNOWN_TOPPING_EDIT,
};
use crate::pagination::{PageQuery, PageRequest, PIZZAS_PER_PAGE};
use crate::paths;
use crate::response::found;
use crate::views;
use crate::views::pizzas::PizzaDraft;

/// Paginated list of pizzas with their toppings
pub async fn pizzas_overview(
    State(db): State<DbState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    info!("Listing pizzas (page: {:?})", query.page);

    let total = db.pizza_storage.count_pizzas().await?;
    let meta = PageRequest::parse(query.page.as_deref())?.resolve(total, PIZZAS_PER_PAGE)?;

    let (pizzas, _) = db
        .pizza_storage
        .list_pizzas_paginated(Some(meta.page_size), Some(meta.offset()))
        .await?;

    Ok(Html(views::pizzas::overview(&pizzas, &meta)))
}

/// Editor page for one pizza
pub async fn pizza_editor(
    State(db): State<DbState>,
    Path(pizza_id): Path<String>,
) -> Result<Response, AppError> {
    info!("Showing pizza editor: {}", pizza_id);

    let pizza = db.pizza_storage.get_pizza(parse_item_id(&pizza_id)?).await?;
    render_editor(&db, &pizza, None).await
}

async fn render_editor(
    db: &DbState,
    pizza: &Pizza,
    error: Option<&str>,
) -> Result<Response, AppError> {
    let toppings = db.topping_storage.list_toppings().await?;
    Ok(Html(views::pizzas::editor(pizza, &toppings, error)).into_response())
}

/// Apply the action submitted from the pizza editor
pub async fn update_pizza(
    State(db): State<DbState>,
    Path(pizza_id): Path<String>,
    form: FormData,
) -> Result<Response, AppError> {
    let pizza = db.pizza_storage.get_pizza(parse_item_id(&pizza_id)?).await?;

    let action = match PizzaEditAction::from_form(&form) {
        Ok(Some(action)) => action,
        Ok(None) => return Ok(found(&paths::pizza_editor(pizza.id))),
        Err(e) => {
            warn!("Rejected pizza form for {}: {}", pizza.id, e);
            return render_editor(&db, &pizza, Some(INCOMPLETE_FORM)).await;
        }
    };

    match apply_action(&db, pizza.id, action).await {
        Ok(()) => Ok(found(paths::PIZZA_OVERVIEW)),
        Err(e @ (StorageError::UnknownTopping(_) | StorageError::ToppingNotFound(_))) => {
            info!("Pizza {} form referenced a missing topping: {}", pizza.id, e);
            render_editor(&db, &pizza, Some(UNKNOWN_TOPPING_EDIT)).await
        }
        Err(e) => match e.name_rejection() {
            Some(rejection) => {
                info!("Rejected pizza rename for {}: {}", pizza.id, rejection);
                let message = rejection.message(EntityKind::Pizza, Outcome::Rename);
                render_editor(&db, &pizza, Some(&message)).await
            }
            None => Err(e.into()),
        },
    }
}

async fn apply_action(
    db: &DbState,
    pizza_id: i64,
    action: PizzaEditAction,
) -> Result<(), StorageError> {
    match action {
        PizzaEditAction::Rename { new_name } => {
            info!("Renaming pizza {} to {}", pizza_id, new_name);
            db.pizza_storage.rename_pizza(pizza_id, &new_name).await?;
        }
        PizzaEditAction::Delete => {
            info!("Deleting pizza: {}", pizza_id);
            db.pizza_storage.delete_pizza(pizza_id).await?;
        }
        PizzaEditAction::AddToppings { toppings } => {
            info!("Adding toppings {:?} to pizza {}", toppings, pizza_id);
            let topping_ids = db.topping_storage.resolve_topping_names(&toppings).await?;
            db.pizza_storage.add_toppings(pizza_id, &topping_ids).await?;
        }
        PizzaEditAction::RemoveTopping { topping } => {
            info!("Removing topping {} from pizza {}", topping, pizza_id);
            let topping_id = db.topping_storage.resolve_topping_name(&topping).await?;
            db.pizza_storage.remove_topping(pizza_id, topping_id).await?;
        }
        PizzaEditAction::ReplaceTopping { prior, toppings } => {
            info!(
                "Replacing topping {} with {:?} on pizza {}",
                prior, toppings, pizza_id
            );
            let prior_id = db.topping_storage.resolve_topping_name(&prior).await?;
            let topping_ids = db.topping_storage.resolve_topping_names(&toppings).await?;
            db.pizza_storage
                .replace_topping(pizza_id, prior_id, &topping_ids)
                .await?;
        }
    }

    Ok(())
}

/// Pizza create form listing every topping
pub async fn new_pizza_form(State(db): State<DbState>) -> Result<Response, AppError> {
    render_create_form(&db, &PizzaDraft::default(), None).await
}

async fn render_create_form(
    db: &DbState,
    draft: &PizzaDraft,
    error: Option<&str>,
) -> Result<Response, AppError> {
    let toppings = db.topping_storage.list_toppings().await?;
    Ok(Html(views::pizzas::create_form(&toppings, draft, error)).into_response())
}

/// Create a pizza, with its selected toppings, from the submitted form
pub async fn create_pizza(
    State(db): State<DbState>,
    form: FormData,
) -> Result<Response, AppError> {
    let Some(name) = form.value("new_pizza_name") else {
        warn!("Pizza create form without a name");
        return render_create_form(&db, &PizzaDraft::default(), Some(INCOMPLETE_FORM)).await;
    };

    let draft = PizzaDraft {
        name: name.to_string(),
        toppings: form.selected("toppings_options"),
    };

    info!("Creating pizza {} with toppings {:?}", draft.name, draft.toppings);

    let message = match create_from_draft(&db, &draft).await {
        Ok(pizza) => {
            debug!("Created pizza {}", pizza.id);
            return Ok(found(paths::PIZZA_OVERVIEW));
        }
        Err(e @ (StorageError::UnknownTopping(_) | StorageError::ToppingNotFound(_))) => {
            info!("New pizza {} referenced a missing topping: {}", draft.name, e);
            UNKNOWN_TOPPING_CREATE.to_string()
        }
        Err(e) => match e.name_rejection() {
            Some(rejection) => {
                info!("Rejected new pizza {}: {}", draft.name, rejection);
                rejection.message(EntityKind::Pizza, Outcome::Create)
            }
            None => return Err(e.into()),
        },
    };

    render_create_form(&db, &draft, Some(&message)).await
}

async fn create_from_draft(db: &DbState, draft: &PizzaDraft) -> Result<Pizza, StorageError> {
    let topping_ids = db.topping_storage.resolve_topping_names(&draft.toppings).await?;

    db.pizza_storage
        .create_pizza(PizzaCreateInput {
            name: draft.name.clone(),
            topping_ids,
        })
        .await
}
