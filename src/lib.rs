//! Meta Ads Relay Library
//!
//! A thin REST relay in front of the Meta Graph (Marketing) API: lists
//! campaigns, ad sets and ad-set insights in a simplified JSON shape, and
//! pauses or resumes campaigns and ad sets.
//!
//! # Modules
//!
//! - `api`: HTTP-facing components.
//! - `core`: Derivation logic, response models and errors.
//! - `integrations`: Graph API client and payload records.
//! - `ads_client`: `AdsPlatform` trait and the Graph API implementation.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `graph_models`: Typed Graph API records with defaulting.
//! - `handlers`: HTTP request handlers.
//! - `metrics`: Spend / purchases / revenue / ROAS derivation.
//! - `models`: Response views and request bodies.
//! - `routes`: Router construction and middleware.

pub mod api;
pub mod core;
pub mod integrations;

pub mod ads_client;
pub mod config;
pub mod errors;
pub mod graph_models;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod routes;
