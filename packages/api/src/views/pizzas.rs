// ABOUTME: Pizza pages for the Chef
// ABOUTME: Paginated overview with toppings, editor for name and toppings, and the create form

use pizzeria_core::MAX_NAME_LENGTH;
use pizzeria_pizzas::Pizza;
use pizzeria_toppings::Topping;

use super::{error_banner, escape, layout, pager};
use crate::pagination::PaginationMeta;
use crate::paths;

pub fn overview(pizzas: &[Pizza], meta: &PaginationMeta) -> String {
    let listing = if pizzas.is_empty() {
        r#"<p class="muted">No pizzas have been created yet.</p>"#.to_string()
    } else {
        let items = pizzas
            .iter()
            .map(|pizza| {
                format!(
                    r#"<li><a href="{}">{}</a>{}</li>"#,
                    paths::pizza_editor(pizza.id),
                    escape(&pizza.name),
                    topping_summary(&pizza.toppings)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("<ul class=\"catalog\">\n{}\n</ul>", items)
    };

    layout(
        "Pizzas",
        &format!(
            r#"<h1>Pizzas</h1>
<p><a href="{new}">Create a new pizza</a></p>
{listing}
{pager}"#,
            new = paths::NEW_PIZZA,
            listing = listing,
            pager = pager(paths::PIZZA_OVERVIEW, meta),
        ),
    )
}

fn topping_summary(toppings: &[Topping]) -> String {
    if toppings.is_empty() {
        return r#" <span class="muted">(no toppings)</span>"#.to_string();
    }

    let items: String = toppings
        .iter()
        .map(|topping| format!("<li>{}</li>", escape(&topping.name)))
        .collect();
    format!(r#"<ul class="toppings">{}</ul>"#, items)
}

/// Checkbox list submitting topping names as `toppings_options`
fn topping_checkboxes(toppings: &[&Topping], checked: &[String], id_prefix: &str) -> String {
    toppings
        .iter()
        .map(|topping| {
            format!(
                r#"<label for="{prefix}-{id}"><input type="checkbox" id="{prefix}-{id}" name="toppings_options" value="{name}"{checked}> {name}</label><br>"#,
                prefix = id_prefix,
                id = topping.id,
                checked = if checked.contains(&topping.name) { " checked" } else { "" },
                name = escape(&topping.name),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Editor page. `all_toppings` is every topping in the catalog.
pub fn editor(pizza: &Pizza, all_toppings: &[Topping], error: Option<&str>) -> String {
    let action = paths::pizza_editor(pizza.id);
    let available: Vec<&Topping> = all_toppings
        .iter()
        .filter(|topping| !pizza.has_topping(topping.id))
        .collect();

    let current = if pizza.toppings.is_empty() {
        r#"<p class="muted">This pizza has no toppings yet.</p>"#.to_string()
    } else {
        let items = pizza
            .toppings
            .iter()
            .map(|topping| {
                format!(
                    r#"<li>{name}
<form method="post" action="{action}" style="display:inline">
<input type="hidden" name="deleted_topping" value="{name}">
<button type="submit" name="pizza_topping_delete" value="pizza_topping_delete">Remove</button>
</form></li>"#,
                    name = escape(&topping.name),
                    action = action,
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("<ul class=\"toppings\">\n{}\n</ul>", items)
    };

    let additions = if available.is_empty() {
        r#"<p class="muted">Every topping is already on this pizza.</p>"#.to_string()
    } else {
        let mut forms = format!(
            r#"<h2>Add toppings</h2>
<form method="post" action="{action}">
{boxes}
<button type="submit" name="pizza_topping_add" value="pizza_topping_add">Add selected</button>
</form>"#,
            action = action,
            boxes = topping_checkboxes(&available, &[], "add"),
        );

        if !pizza.toppings.is_empty() {
            let options: String = pizza
                .toppings
                .iter()
                .map(|topping| {
                    let name = escape(&topping.name);
                    format!(r#"<option value="{}">{}</option>"#, name, name)
                })
                .collect();

            forms.push_str(&format!(
                r#"
<h2>Swap a topping</h2>
<form method="post" action="{action}">
<label for="prior_topping">Replace</label>
<select id="prior_topping" name="prior_topping">{options}</select>
<p>with:</p>
{boxes}
<button type="submit" name="pizza_topping_change" value="pizza_topping_change">Swap</button>
</form>"#,
                action = action,
                options = options,
                boxes = topping_checkboxes(&available, &[], "swap"),
            ));
        }

        forms
    };

    layout(
        &pizza.name,
        &format!(
            r#"<h1>Pizza: {name}</h1>
{error}
<form method="post" action="{action}">
<label for="new_name">New name</label>
<input id="new_name" name="new_name" type="text" maxlength="{max}" required>
<button type="submit" name="pizza_name_change" value="pizza_name_change">Rename</button>
</form>
<h2>Toppings</h2>
{current}
{additions}
<form method="post" action="{action}">
<button type="submit" name="pizza_delete" value="pizza_delete" class="danger">Delete this pizza</button>
</form>
<p><a href="{back}">Back to pizzas</a></p>"#,
            name = escape(&pizza.name),
            error = error_banner(error),
            action = action,
            max = MAX_NAME_LENGTH,
            current = current,
            additions = additions,
            back = paths::PIZZA_OVERVIEW,
        ),
    )
}

/// What the Chef had entered when a create attempt was rejected
#[derive(Debug, Clone, Default)]
pub struct PizzaDraft {
    pub name: String,
    /// Names of the toppings that were ticked
    pub toppings: Vec<String>,
}

pub fn create_form(all_toppings: &[Topping], draft: &PizzaDraft, error: Option<&str>) -> String {
    let toppings = if all_toppings.is_empty() {
        r#"<p class="muted">No toppings are available yet.</p>"#.to_string()
    } else {
        let refs: Vec<&Topping> = all_toppings.iter().collect();
        topping_checkboxes(&refs, &draft.toppings, "new")
    };

    layout(
        "New pizza",
        &format!(
            r#"<h1>New pizza</h1>
{error}
<form method="post" action="{action}">
<label for="new_pizza_name">Name</label>
<input id="new_pizza_name" name="new_pizza_name" type="text" maxlength="{max}" value="{draft}" required>
<h2>Toppings</h2>
{toppings}
<button type="submit" name="pizza_new" value="pizza_new">Create pizza</button>
</form>
<p><a href="{back}">Back to pizzas</a></p>"#,
            error = error_banner(error),
            action = paths::NEW_PIZZA,
            max = MAX_NAME_LENGTH,
            draft = escape(&draft.name),
            toppings = toppings,
            back = paths::PIZZA_OVERVIEW,
        ),
    )
}
