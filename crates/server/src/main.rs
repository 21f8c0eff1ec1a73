#[tokio::main]
async fn main() -> anyhow::Result<()> {
    roster_server::start().await
}
