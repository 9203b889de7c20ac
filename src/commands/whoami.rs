use super::open_view;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_success};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let mut view = open_view()?;
    let Some(session) = view.session() else {
        msg_bail_anyhow!(Message::NotLoggedIn);
    };

    if !view.check_session().await {
        msg_bail_anyhow!(Message::SessionInvalid);
    }

    let identity = session.email().map(str::to_string).unwrap_or_else(|| session.identity.to_string());
    msg_success!(Message::SessionValid(identity));
    Ok(())
}
