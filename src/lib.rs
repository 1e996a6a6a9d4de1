pub mod api_doc;
pub mod configuration;
pub mod cors;
pub mod domain;
pub mod email_client;
pub mod email_templates;
pub mod notification_dispatcher;
pub mod routes;
pub mod startup;
pub mod static_assets;
pub mod telemetry;
