#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hanzi_packs_backend::run().await
}
