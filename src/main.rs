// Thin delegating binary.
//
// The actual server assembly lives in the `hrms-server` crate.
#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    hrms_server::run().await
}
