// Interface adapters: HTTP routes, wire DTOs, and storage adapters.

pub mod handlers;
pub mod http;
pub mod protocol;
pub mod repository;
pub mod routes;
pub mod state;
