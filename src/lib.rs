#![doc = "The `campusbridge` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, authentication mechanisms, authorization"]
#![doc = "policy, database schema setup, routing configuration, and error handling for the"]
#![doc = "CampusBridge alumni/placement backend. It is used by the main binary (`main.rs`)"]
#![doc = "to construct and run the application."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod policy;
pub mod routes;
