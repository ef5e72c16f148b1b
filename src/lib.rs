//! Personal recipe catalog with serving-size scaling and a shopping list.

pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod logging;
pub mod mealdb;
pub mod models;
pub mod scaling;
pub mod seed;
pub mod shopping;

pub use error::{MunchError, Result};
