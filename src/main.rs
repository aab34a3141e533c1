#[tokio::main]
async fn main() -> anyhow::Result<()> {
    keyboard_presence::run().await
}
