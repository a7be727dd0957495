//! Example: Abort a slow action and forward the abort to the work itself
use std::{sync::Arc, time::Duration};

use tcrm_action::tasks::{
    config::TaskConfig, control::TaskStatusInfo, controller::TaskController,
};
use tokio::sync::Notify;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cancel = Arc::new(Notify::new());

    let action_cancel = Arc::clone(&cancel);
    let abort_cancel = Arc::clone(&cancel);
    let controller = TaskController::new(
        move |arg: Option<u64>| {
            let cancel = Arc::clone(&action_cancel);
            async move {
                let delay = Duration::from_secs(arg.unwrap_or(10));
                tokio::select! {
                    _ = tokio::time::sleep(delay) => Ok::<_, String>(Some("downloaded".to_string())),
                    _ = cancel.notified() => Err("cancelled".to_string()),
                }
            }
        },
        TaskConfig::new()
            .tag("download")
            .argument(10)
            .abort(move |_| abort_cancel.notify_one()),
    );
    controller.on_aborted(|ctx| println!("Aborted while holding {:?}", ctx.argument));

    let handle = controller.clone();
    let aborter = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort()
    });

    let outcome = controller.execute().await?;
    aborter.await??;
    println!(
        "Outcome: {:?}, state: {}",
        outcome,
        controller.get_state()
    );
    Ok(())
}
