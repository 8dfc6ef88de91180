pub mod github_proxy_client;
