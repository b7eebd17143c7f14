#[tokio::main]
async fn main() {
    collector::start(std::env::args()).await;
}
