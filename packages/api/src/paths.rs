// ABOUTME: URL paths of the HTML pages
// ABOUTME: Used for links, form actions, and redirects so they cannot drift apart

pub const LANDING: &str = "/";
pub const TOPPINGS_OVERVIEW: &str = "/toppings/";
pub const NEW_TOPPING: &str = "/toppings/new";
pub const PIZZA_OVERVIEW: &str = "/pizza/";
pub const NEW_PIZZA: &str = "/pizza/new";

pub fn topping_editor(topping_id: i64) -> String {
    format!("/toppings/{}/", topping_id)
}

pub fn pizza_editor(pizza_id: i64) -> String {
    format!("/pizza/{}/", pizza_id)
}
