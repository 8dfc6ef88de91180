pub mod linkedin_proxy_client;
