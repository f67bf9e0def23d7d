use std::process::ExitCode;

use emp_web::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("emp_web: {err}");
            return ExitCode::FAILURE;
        }
    };

    match emp_web::start_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("emp_web: {err}");
            ExitCode::FAILURE
        }
    }
}
