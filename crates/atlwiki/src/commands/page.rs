//! `atlwiki page` command implementation.

use atlwiki_client::Page;
use clap::Args;

use super::ConnectionArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the page command.
#[derive(Args)]
pub(crate) struct PageArgs {
    /// Page ID.
    #[arg(allow_negative_numbers = true)]
    id: i64,

    /// Also fetch the page body (storage format).
    #[arg(long)]
    content: bool,

    /// Print the page as JSON.
    #[arg(long)]
    json: bool,
}

impl PageArgs {
    #[cfg(test)]
    pub(crate) fn id(&self) -> i64 {
        self.id
    }

    /// Execute the page command.
    pub(crate) fn execute(
        self,
        connection: &ConnectionArgs,
        output: &Output,
    ) -> Result<(), CliError> {
        let client = connection.client()?;
        let page = client.get_page(self.id, self.content)?;

        if self.json {
            output.data(&serde_json::to_string_pretty(&page)?);
            return Ok(());
        }

        output.highlight(&page.title);
        output.info(&format!("ID: {}", page.id));
        if let Some(body) = content_section(&page, self.content) {
            output.data(&body);
        }
        Ok(())
    }
}

/// Body text to print, if content was requested.
fn content_section(page: &Page, requested: bool) -> Option<String> {
    if !requested {
        return None;
    }
    if page.content.is_empty() {
        Some("(empty page)".to_owned())
    } else {
        Some(page.content.clone())
    }
}
