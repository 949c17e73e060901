#[tokio::main]
async fn main() {
    reservation_backend::run().await;
}
