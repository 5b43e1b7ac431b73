use spectrum_analyzer::app::SpectrumAnalyzerApp;
use spectrum_analyzer::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::from_args(std::env::args_os());
    let options = config.native_options();
    let title = config.title.clone();

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(SpectrumAnalyzerApp::new(config)))),
    )
}
