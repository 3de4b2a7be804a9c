use super::ui::spin;
use crate::output::Output;
use color_eyre::Result;
use movienight_config::Config;
use serde_json::json;

pub async fn run_status(config: &Config, output: &Output) -> Result<()> {
    let ctx = super::connect(config)?;
    let url = &config.backend.url;

    match spin("Checking backend...", output, ctx.api().health()).await {
        Ok(ack) if ack.ok => {
            if output.is_human() {
                output.success(format!("Backend at {} is up", url));
            } else {
                output.json(&json!({ "backend": url, "ok": true }));
            }
            Ok(())
        }
        Ok(_) => Err(color_eyre::eyre::eyre!("Backend at {} reported it is not healthy", url)),
        Err(e) => {
            tracing::warn!(backend = %url, error = %e, "Health check failed");
            Err(color_eyre::eyre::eyre!("Backend at {} is unreachable: {}", url, e))
        }
    }
}
