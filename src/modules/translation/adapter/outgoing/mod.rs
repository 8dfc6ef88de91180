pub mod translation_proxy_client;
