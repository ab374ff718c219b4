//! Registration form core: field schema, CEP lookup, submission pipeline
//! and the terminal front end that drives them.

pub mod app;
pub mod config;
pub mod form;
pub mod services;
pub mod ui;
