// ABOUTME: Configuration constants shared by the Pizzeria binary and tests
// ABOUTME: Keeps environment variable names in one place

pub mod constants;
