mod api_client;
mod common;
