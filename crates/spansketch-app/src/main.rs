//! Main application entry point.

fn main() {
    env_logger::init();
    log::info!("Starting SpanSketch");

    if let Err(e) = spansketch_app::App::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
