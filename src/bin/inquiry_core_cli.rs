use inquiry_core::{
    cli::{output, run_cli},
    client::HttpApi,
    config::ConfigManager,
    errors::InquiryError,
    init,
    utils::build_info,
};

fn main() {
    init();

    if std::env::args().any(|arg| arg == "--version" || arg == "-V") {
        println!("{}", build_info::current().banner());
        return;
    }

    if let Err(err) = run() {
        output::error(&err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), InquiryError> {
    let config = ConfigManager::new()?.load()?.with_env_overrides();
    let api = HttpApi::new(&config)?;
    run_cli(&api)
}
