//! Binary entry point. All startup logic lives in the library crate.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    feedback_ingest::run().await
}
