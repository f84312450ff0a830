pub mod calendar_client;
pub mod config;
pub mod error;
pub mod event_mapper;
pub mod text_generator;
