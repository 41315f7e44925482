#[tokio::main]
async fn main() {
    if let Err(err) = receipt_points::run().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
