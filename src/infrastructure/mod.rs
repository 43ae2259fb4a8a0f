pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod db;
pub mod generation_gateway;
pub mod llm_clients;
pub mod response;

#[cfg(test)]
pub(crate) mod test_server;
