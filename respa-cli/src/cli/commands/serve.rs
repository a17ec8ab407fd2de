//! Serve command handler

use anyhow::Result;

use crate::cli::ServeArgs;
use crate::config::Config;
use crate::{repository, web};

pub async fn handle_serve_command(args: ServeArgs, config: &Config) -> Result<()> {
    let bind = args.bind.unwrap_or_else(|| config.bind().to_string());
    let pool = repository::connect(&config.resolve_database_url()?).await?;
    web::serve(pool, &bind).await
}
