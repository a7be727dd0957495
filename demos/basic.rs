//! Basic example: Run an action, react to its hooks and reset it
use tcrm_action::tasks::{
    config::TaskConfig, control::TaskStatusInfo, controller::TaskController,
};

#[derive(Debug, Clone)]
struct Range {
    start: i64,
    end: i64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = TaskConfig::new()
        .tag("sum")
        .argument(Range { start: 1, end: 2 })
        .can_execute(|arg: Option<&Range>| arg.is_some_and(|r| r.end > r.start))
        .create_argument(|| async { Some(Range { start: 10, end: 20 }) });
    config.validate()?;

    let controller = TaskController::new(
        |arg: Option<Range>| async move {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            let range = arg.ok_or_else(|| "missing range".to_string())?;
            Ok::<_, String>(Some(range.start + range.end))
        },
        config,
    );

    controller
        .on_executing(|ctx| println!("Executing with {:?}", ctx.argument))
        .on_completed(|ctx| println!("Completed: {:?}", ctx.result))
        .on_failed(|ctx| eprintln!("Failed: {:?}", ctx.error))
        .on_idle(|ctx| println!("Idle again, next argument {:?}", ctx.argument));

    controller.execute().await?;

    if let Err(e) = controller.execute_with(Range { start: 5, end: 1 }).await {
        println!("Rejected: {}", e);
    }

    controller.reset().await?;
    controller.execute().await?;
    println!("Final: {:?}", controller.get_information());
    Ok(())
}
