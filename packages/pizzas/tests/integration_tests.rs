// ABOUTME: Integration tests for pizza storage operations
// ABOUTME: Tests pizza CRUD, duplicate prevention, and adding, removing, and swapping toppings

use pizzeria_core::NameRejection;
use pizzeria_pizzas::{Pizza, PizzaCreateInput, PizzaStorage};
use pizzeria_storage::{init_in_memory, StorageError};
use pizzeria_toppings::{Topping, ToppingCreateInput, ToppingStorage};
use pretty_assertions::assert_eq;

struct TestCatalog {
    toppings: ToppingStorage,
    pizzas: PizzaStorage,
}

async fn create_test_catalog() -> TestCatalog {
    let pool = init_in_memory().await.unwrap();
    TestCatalog {
        toppings: ToppingStorage::new(pool.clone()),
        pizzas: PizzaStorage::new(pool),
    }
}

impl TestCatalog {
    async fn topping(&self, name: &str) -> Topping {
        self.toppings
            .create_topping(ToppingCreateInput {
                name: name.to_string(),
            })
            .await
            .unwrap()
    }

    async fn pizza(&self, name: &str, toppings: &[&Topping]) -> Pizza {
        self.pizzas
            .create_pizza(PizzaCreateInput {
                name: name.to_string(),
                topping_ids: toppings.iter().map(|t| t.id).collect(),
            })
            .await
            .unwrap()
    }
}

fn topping_names(pizza: &Pizza) -> Vec<&str> {
    pizza.toppings.iter().map(|t| t.name.as_str()).collect()
}

#[tokio::test]
async fn test_create_pizza_without_toppings() {
    let catalog = create_test_catalog().await;

    let pizza = catalog.pizza("TestPizza", &[]).await;

    assert_eq!(pizza.id, 1);
    assert_eq!(pizza.name, "TestPizza");
    assert!(pizza.toppings.is_empty());
}

#[tokio::test]
async fn test_create_pizza_with_toppings() {
    let catalog = create_test_catalog().await;
    let cheese = catalog.topping("Test Topping").await;
    let basil = catalog.topping("TestTopping2").await;

    let pizza = catalog.pizza("TestPizza", &[&cheese, &basil]).await;

    assert_eq!(topping_names(&pizza), vec!["Test Topping", "TestTopping2"]);
    assert!(pizza.has_topping(cheese.id));
    assert!(pizza.has_topping(basil.id));
}

#[tokio::test]
async fn test_create_pizza_with_repeated_topping_links_once() {
    let catalog = create_test_catalog().await;
    let cheese = catalog.topping("Cheese").await;

    let pizza = catalog.pizza("Cheesy", &[&cheese, &cheese]).await;

    assert_eq!(topping_names(&pizza), vec!["Cheese"]);
}

#[tokio::test]
async fn test_create_pizza_with_unknown_topping_creates_nothing() {
    let catalog = create_test_catalog().await;
    let cheese = catalog.topping("Cheese").await;

    let result = catalog
        .pizzas
        .create_pizza(PizzaCreateInput {
            name: "Ghost".to_string(),
            topping_ids: vec![cheese.id, 99],
        })
        .await;

    assert!(matches!(result, Err(StorageError::ToppingNotFound(99))));
    assert_eq!(catalog.pizzas.count_pizzas().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_duplicate_pizza_rejected() {
    let catalog = create_test_catalog().await;
    catalog.pizza("TestPizza", &[]).await;

    let result = catalog
        .pizzas
        .create_pizza(PizzaCreateInput {
            name: "TestPizza".to_string(),
            topping_ids: vec![],
        })
        .await;

    assert!(matches!(result, Err(StorageError::DuplicateName(_))));
    assert_eq!(catalog.pizzas.count_pizzas().await.unwrap(), 1);
}

#[tokio::test]
async fn test_pizza_and_topping_names_are_separate() {
    let catalog = create_test_catalog().await;
    catalog.topping("Margherita").await;

    // The same name may be used by a topping and a pizza
    let pizza = catalog.pizza("Margherita", &[]).await;
    assert_eq!(pizza.name, "Margherita");
}

#[tokio::test]
async fn test_create_pizza_rejects_special_characters() {
    let catalog = create_test_catalog().await;

    let result = catalog
        .pizzas
        .create_pizza(PizzaCreateInput {
            name: "Ham & Pineapple".to_string(),
            topping_ids: vec![],
        })
        .await;

    assert!(matches!(
        result,
        Err(StorageError::InvalidName(NameRejection::SpecialCharacters))
    ));
}

#[tokio::test]
async fn test_list_pizzas_paginated_with_toppings() {
    let catalog = create_test_catalog().await;
    let cheese = catalog.topping("Cheese").await;
    let ham = catalog.topping("Ham").await;

    for i in 1..=7 {
        let toppings: Vec<&Topping> = if i % 2 == 0 { vec![&cheese, &ham] } else { vec![&cheese] };
        catalog.pizza(&format!("Pizza {}", i), &toppings).await;
    }

    let (page, total) = catalog
        .pizzas
        .list_pizzas_paginated(Some(5), Some(5))
        .await
        .unwrap();

    assert_eq!(total, 7);
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].name, "Pizza 6");
    assert_eq!(topping_names(&page[0]), vec!["Cheese", "Ham"]);
    assert_eq!(page[1].name, "Pizza 7");
    assert_eq!(topping_names(&page[1]), vec!["Cheese"]);
}

#[tokio::test]
async fn test_rename_pizza() {
    let catalog = create_test_catalog().await;
    let pizza = catalog.pizza("TestPizza", &[]).await;

    let renamed = catalog
        .pizzas
        .rename_pizza(pizza.id, "PizzaTest")
        .await
        .unwrap();

    assert_eq!(renamed.name, "PizzaTest");
    assert_eq!(
        catalog.pizzas.get_pizza(pizza.id).await.unwrap().name,
        "PizzaTest"
    );
}

#[tokio::test]
async fn test_rename_pizza_to_existing_name_rejected() {
    let catalog = create_test_catalog().await;
    catalog.pizza("TestPizza", &[]).await;
    let second = catalog.pizza("Test Pizza", &[]).await;

    let result = catalog.pizzas.rename_pizza(second.id, "TestPizza").await;

    assert!(matches!(result, Err(StorageError::DuplicateName(_))));
    assert_eq!(
        catalog.pizzas.get_pizza(second.id).await.unwrap().name,
        "Test Pizza"
    );
}

#[tokio::test]
async fn test_delete_pizza() {
    let catalog = create_test_catalog().await;
    let cheese = catalog.topping("Cheese").await;
    let pizza = catalog.pizza("TestPizza", &[&cheese]).await;

    catalog.pizzas.delete_pizza(pizza.id).await.unwrap();

    assert_eq!(catalog.pizzas.count_pizzas().await.unwrap(), 0);
    // The topping itself survives
    assert_eq!(catalog.toppings.count_toppings().await.unwrap(), 1);

    let again = catalog.pizzas.delete_pizza(pizza.id).await;
    assert!(matches!(again, Err(StorageError::NotFound)));
}

#[tokio::test]
async fn test_deleting_topping_removes_it_from_pizzas() {
    let catalog = create_test_catalog().await;
    let cheese = catalog.topping("Cheese").await;
    let ham = catalog.topping("Ham").await;
    let pizza = catalog.pizza("TestPizza", &[&cheese, &ham]).await;

    catalog.toppings.delete_topping(ham.id).await.unwrap();

    let pizza = catalog.pizzas.get_pizza(pizza.id).await.unwrap();
    assert_eq!(topping_names(&pizza), vec!["Cheese"]);
}

#[tokio::test]
async fn test_add_toppings() {
    let catalog = create_test_catalog().await;
    let cheese = catalog.topping("Cheese").await;
    let ham = catalog.topping("Ham").await;
    let pizza = catalog.pizza("TestPizza", &[&cheese]).await;

    let updated = catalog
        .pizzas
        .add_toppings(pizza.id, &[cheese.id, ham.id])
        .await
        .unwrap();

    assert_eq!(topping_names(&updated), vec!["Cheese", "Ham"]);
}

#[tokio::test]
async fn test_add_unknown_topping_changes_nothing() {
    let catalog = create_test_catalog().await;
    let cheese = catalog.topping("Cheese").await;
    let pizza = catalog.pizza("TestPizza", &[]).await;

    let result = catalog
        .pizzas
        .add_toppings(pizza.id, &[cheese.id, 404])
        .await;

    assert!(matches!(result, Err(StorageError::ToppingNotFound(404))));
    let pizza = catalog.pizzas.get_pizza(pizza.id).await.unwrap();
    assert!(pizza.toppings.is_empty());
}

#[tokio::test]
async fn test_add_toppings_to_missing_pizza() {
    let catalog = create_test_catalog().await;
    let cheese = catalog.topping("Cheese").await;

    let result = catalog.pizzas.add_toppings(12, &[cheese.id]).await;
    assert!(matches!(result, Err(StorageError::NotFound)));
}

#[tokio::test]
async fn test_remove_topping() {
    let catalog = create_test_catalog().await;
    let cheese = catalog.topping("Test Topping").await;
    let basil = catalog.topping("TestTopping2").await;
    let pizza = catalog.pizza("TestPizza", &[&cheese, &basil]).await;

    let updated = catalog
        .pizzas
        .remove_topping(pizza.id, cheese.id)
        .await
        .unwrap();
    assert_eq!(topping_names(&updated), vec!["TestTopping2"]);

    // Removing it again is a no-op
    let unchanged = catalog
        .pizzas
        .remove_topping(pizza.id, cheese.id)
        .await
        .unwrap();
    assert_eq!(topping_names(&unchanged), vec!["TestTopping2"]);
}

#[tokio::test]
async fn test_replace_topping() {
    let catalog = create_test_catalog().await;
    let cheese = catalog.topping("Test Topping").await;
    let basil = catalog.topping("TestTopping2").await;
    let ham = catalog.topping("Ham").await;
    let pizza = catalog.pizza("TestPizza", &[&cheese]).await;

    let updated = catalog
        .pizzas
        .replace_topping(pizza.id, cheese.id, &[basil.id, ham.id])
        .await
        .unwrap();

    assert_eq!(topping_names(&updated), vec!["TestTopping2", "Ham"]);
}

#[tokio::test]
async fn test_replace_topping_with_unknown_replacement_is_atomic() {
    let catalog = create_test_catalog().await;
    let cheese = catalog.topping("Cheese").await;
    let pizza = catalog.pizza("TestPizza", &[&cheese]).await;

    let result = catalog
        .pizzas
        .replace_topping(pizza.id, cheese.id, &[77])
        .await;

    assert!(matches!(result, Err(StorageError::ToppingNotFound(77))));
    let pizza = catalog.pizzas.get_pizza(pizza.id).await.unwrap();
    assert_eq!(topping_names(&pizza), vec!["Cheese"]);
}
