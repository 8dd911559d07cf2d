#[tokio::main]
async fn main() -> anyhow::Result<()> {
    reelquest_server::start().await
}
