mod assess;
mod cli;
mod render;

use glazing_risk::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
