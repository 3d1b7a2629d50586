// ABOUTME: Topping pages for the Owner
// ABOUTME: Paginated overview, editor with rename and delete, and the create form

use pizzeria_core::MAX_NAME_LENGTH;
use pizzeria_toppings::Topping;

use super::{error_banner, escape, layout, pager};
use crate::pagination::PaginationMeta;
use crate::paths;

pub fn overview(toppings: &[Topping], meta: &PaginationMeta) -> String {
    let listing = if toppings.is_empty() {
        r#"<p class="muted">No toppings are available.</p>"#.to_string()
    } else {
        let items: String = toppings
            .iter()
            .map(|topping| {
                format!(
                    r#"<li><a href="{}">{}</a></li>"#,
                    paths::topping_editor(topping.id),
                    escape(&topping.name)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("<ul class=\"catalog\">\n{}\n</ul>", items)
    };

    layout(
        "Toppings",
        &format!(
            r#"<h1>Available toppings</h1>
<p><a href="{new}">Add a new topping</a></p>
{listing}
{pager}"#,
            new = paths::NEW_TOPPING,
            listing = listing,
            pager = pager(paths::TOPPINGS_OVERVIEW, meta),
        ),
    )
}

pub fn editor(topping: &Topping, error: Option<&str>) -> String {
    let action = paths::topping_editor(topping.id);

    layout(
        &topping.name,
        &format!(
            r#"<h1>Topping: {name}</h1>
{error}
<form method="post" action="{action}">
<label for="new_name">New name</label>
<input id="new_name" name="new_name" type="text" maxlength="{max}" required>
<button type="submit" name="topping_name_change" value="topping_name_change">Rename</button>
</form>
<form method="post" action="{action}">
<button type="submit" name="topping_delete" value="topping_delete" class="danger">Delete this topping</button>
</form>
<p><a href="{back}">Back to toppings</a></p>"#,
            name = escape(&topping.name),
            error = error_banner(error),
            action = action,
            max = MAX_NAME_LENGTH,
            back = paths::TOPPINGS_OVERVIEW,
        ),
    )
}

/// Create form, refilled with the rejected name after a failed submission
pub fn create_form(draft_name: &str, error: Option<&str>) -> String {
    layout(
        "New topping",
        &format!(
            r#"<h1>New topping</h1>
{error}
<form method="post" action="{action}">
<label for="new_topping_name">Name</label>
<input id="new_topping_name" name="new_topping_name" type="text" maxlength="{max}" value="{draft}" required>
<button type="submit" name="topping_new" value="topping_new">Create topping</button>
</form>
<p><a href="{back}">Back to toppings</a></p>"#,
            error = error_banner(error),
            action = paths::NEW_TOPPING,
            max = MAX_NAME_LENGTH,
            draft = escape(draft_name),
            back = paths::TOPPINGS_OVERVIEW,
        ),
    )
}
