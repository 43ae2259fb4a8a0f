#[actix_web::main]
async fn main() -> std::io::Result<()> {
    qsuite_lib::run().await
}
