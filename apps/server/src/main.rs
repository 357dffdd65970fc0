#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vowel_game_server::run().await
}
