use super::open_signed_in_view;
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let view = open_signed_in_view().await?;
    view.render();
    Ok(())
}
