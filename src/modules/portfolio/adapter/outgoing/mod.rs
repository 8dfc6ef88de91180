pub mod portfolio_http_client;
