#[tokio::main]
async fn main() {
    let code = chrona_app_lib::run().await;
    std::process::exit(code);
}
