use super::open_view;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_info, msg_success};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let mut view = open_view()?;
    if !view.is_signed_in() {
        msg_info!(Message::NotLoggedIn);
        return Ok(());
    }
    if !view.logout().await {
        msg_bail_anyhow!(Message::LogoutFailed);
    }

    msg_success!(Message::LogoutSucceeded);
    Ok(())
}
