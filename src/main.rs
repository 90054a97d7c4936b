#[tokio::main]
async fn main() {
    campus_booking_backend::run().await;
}
