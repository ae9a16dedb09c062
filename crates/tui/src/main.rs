mod app;
mod config;
mod error;
mod logging;
mod seed;
mod ui;

use pfm_engine::Engine;

use crate::error::Result;

fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config)?;
    tracing::info!(?config, "starting");

    let seed = seed::load(config.seed_path.as_deref())?;
    let engine = Engine::builder()
        .seed(seed)
        .categories(config.categories)
        .build()?;

    let mut app = app::App::new(engine);
    app.run()
}
