//! Integration tests for the conversation sparks generator

mod cli_routes;
mod config_loading;
mod context_link;
mod export_format;
mod generation_contract;
mod provider_backend;
mod support;
