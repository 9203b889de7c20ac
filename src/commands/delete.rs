use super::open_signed_in_view;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Item id, or its position in `todosync list`
    #[arg(required = true)]
    key: String,
}

pub async fn cmd(args: DeleteArgs) -> Result<()> {
    let mut view = open_signed_in_view().await?;
    let Some(todo) = view.resolve(&args.key).cloned() else {
        msg_bail_anyhow!(Message::TodoNotFound(args.key));
    };

    if !view.delete(&todo.id).await {
        let error = view.error_message().unwrap_or_default().to_string();
        msg_bail_anyhow!(Message::RequestFailed(error));
    }

    msg_success!(Message::TodoDeleted(todo.item));
    view.render();
    Ok(())
}
