//! Waymark - interactive landmark map controller.
//!
//! Drives a map view against a landmark backend: syncs markers for the
//! visible viewport, geocodes free-text searches, draws routes between the
//! user and a selected landmark, and interprets a small chat command grammar.

pub mod chat;
pub mod client;
pub mod config;
pub mod controller;
pub mod geo;
pub mod locate;
pub mod models;
pub mod surface;

pub mod cli;
