use media_picker_lib::{bootstrap, run, RunOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = RunOptions::from_env()?;

    bootstrap::tracing::init_tracing_subscriber()?;

    let report = run(options).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
