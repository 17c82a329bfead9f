#[tokio::main]
async fn main() {
    if let Err(e) = campaign_collab::cli::run().await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
