pub mod config;
pub mod errors;
pub mod handler;
pub mod metrics_defs;
pub mod protocol;
pub mod service;
pub mod wordpress;

#[cfg(test)]
mod testutils;

use crate::errors::UpdaterError;
use crate::handler::UpdateHandler;
use crate::service::UpdaterService;
use crate::wordpress::WordPressClient;
use std::sync::Arc;

pub async fn run(config: config::Config) -> Result<(), UpdaterError> {
    let client = WordPressClient::new(&config.wordpress);
    let handler = UpdateHandler::new(Arc::new(client));
    let updater_service = UpdaterService::new(handler);

    service::run_http_service(
        &config.listener.host,
        config.listener.port,
        updater_service,
    )
    .await
}
