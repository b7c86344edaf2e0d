use std::time::Duration;

use anyhow::Context;
use rusty_webcache::{
    app::{AppData, RuntimeData},
    cache::CachingLayer,
    config::Config,
    helper,
    http::HttpClient,
    store::RedisStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_path()?;

    let level: tracing::Level = config
        .log_level
        .parse()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    run(config).await
}

async fn run(config: Config) -> anyhow::Result<()> {
    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        anyhow::bail!("usage: webcache <url>...");
    }

    let app_data = prepare_app_data(&config).await?;

    for url in urls {
        let page = app_data
            .cacher
            .cached_access(&url, app_data.cache_ttl_secs)
            .await
            .with_context(|| format!("fail to resolve `{url}`"))?;
        let count = app_data.cacher.access_count(&url).await?;

        tracing::info!(url, bytes = page.len(), accesses = count, "page resolved");
        println!("{url}\t{} bytes\t{count} accesses", page.len());
    }

    Ok(())
}

async fn prepare_app_data(config: &Config) -> anyhow::Result<AppData> {
    // env wins over the config file, for container setups
    let redis_addr = helper::env_var_or("REDIS_ADDR", config.redis_addr.clone());

    let store = RedisStore::connect(
        &redis_addr,
        Duration::from_secs(config.store_timeout_secs),
    )
    .await
    .with_context(|| format!("fail to connect to redis at `{redis_addr}`"))?;

    let data = RuntimeData::builder()
        .cacher(CachingLayer::new(store, HttpClient::new()))
        .cache_ttl_secs(config.cache_ttl_secs)
        .build();

    Ok(data.into())
}
