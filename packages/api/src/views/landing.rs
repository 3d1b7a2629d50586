// ABOUTME: Landing page asking whether the visitor is the Owner or the Chef

use super::layout;
use crate::paths;

pub fn landing() -> String {
    layout(
        "Welcome",
        &format!(
            r#"<h1>Who are you?</h1>
<ul class="catalog">
<li><a href="{toppings}">I am the Owner</a>: manage the available toppings</li>
<li><a href="{pizzas}">I am the Chef</a>: manage the pizzas and their toppings</li>
</ul>"#,
            toppings = paths::TOPPINGS_OVERVIEW,
            pizzas = paths::PIZZA_OVERVIEW,
        ),
    )
}
