//! Example: Print transition records through tracing
use tcrm_action::{
    helper::debug::{GlobalConfig, configure},
    tasks::{config::TaskConfig, controller::TaskController},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    // Executing and Completed records are only written in debug mode
    configure(GlobalConfig::new().debug(true))?;

    let controller = TaskController::new(
        |arg: Option<u32>| async move {
            match arg {
                Some(n) if n % 2 == 0 => Ok(Some(n / 2)),
                Some(n) => Err(format!("{} is odd", n)),
                None => Ok(None),
            }
        },
        TaskConfig::new().tag("halve").argument(8),
    );

    controller.execute().await?;
    controller.execute_with(3).await?;
    Ok(())
}
