use std::sync::Arc;

use booking_payments::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let config = Arc::new(
		booking_payments::infrastructure::config::settings::Config::load()
			.map_err(std::io::Error::other)?,
	);
	run(config).await
}
