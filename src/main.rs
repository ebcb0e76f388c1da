// src/main.rs

use cortex_action::{cli, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match run_main().await {
        Ok(true) => {}
        // The failure itself was already reported through the step outputs.
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("cortex-action error: {err:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> anyhow::Result<bool> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    let result = run(args).await?;
    Ok(result.is_success())
}
