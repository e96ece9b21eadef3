use zipdeploy_core::Config;

// mimalloc as the global allocator
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (store, pipeline, routes)
    let (_state, router) = zipdeploy_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    zipdeploy_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
