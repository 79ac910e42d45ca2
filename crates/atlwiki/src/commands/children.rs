//! `atlwiki children` command implementation.

use clap::Args;

use super::ConnectionArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the children command.
#[derive(Args)]
pub(crate) struct ChildrenArgs {
    /// Parent page ID.
    #[arg(allow_negative_numbers = true)]
    id: i64,

    /// Print the IDs as a JSON array.
    #[arg(long)]
    json: bool,
}

impl ChildrenArgs {
    #[cfg(test)]
    pub(crate) fn id(&self) -> i64 {
        self.id
    }

    /// Execute the children command.
    pub(crate) fn execute(
        self,
        connection: &ConnectionArgs,
        output: &Output,
    ) -> Result<(), CliError> {
        let client = connection.client()?;
        let ids = client.get_children_ids(self.id)?;

        if self.json {
            output.data(&serde_json::to_string(&ids)?);
            return Ok(());
        }

        if ids.is_empty() {
            output.info(&format!("Page {} has no children", self.id));
        }
        for id in ids {
            output.data(&id.to_string());
        }
        Ok(())
    }
}
