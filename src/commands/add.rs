use super::open_signed_in_view;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Text of the new item
    #[arg(required = true, num_args = 1..)]
    item: Vec<String>,
}

pub async fn cmd(args: AddArgs) -> Result<()> {
    let text = args.item.join(" ");
    let mut view = open_signed_in_view().await?;

    view.input(text.as_str());
    if !view.submit().await {
        if let Some(reason) = view.validation_message() {
            msg_bail_anyhow!(Message::InvalidTodoItem(reason.to_string()));
        }
        let error = view.error_message().unwrap_or_default().to_string();
        msg_bail_anyhow!(Message::RequestFailed(error));
    }

    msg_success!(Message::TodoCreated(text.trim().to_string()));
    view.render();
    Ok(())
}
