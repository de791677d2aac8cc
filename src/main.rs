use anyhow::{Context, Result};
use env_logger::Env;

fn main() -> Result<()> {
    // RUST_LOG가 없으면 info 까지만
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    glint::run().with_context(|| format!("failed to render {}", glint::OUTPUT_PATH))
}
