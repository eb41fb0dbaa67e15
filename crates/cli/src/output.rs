//! Result rendering: human-readable text or JSON replies

use anyhow::Result;
use serde::Serialize;
use ticketdesk_business::{BusinessResult, ServiceReply};

/// Chooses between text and `ServiceReply` JSON for command results
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print a service result.
    ///
    /// Text mode renders the value with `render` and turns a failure into an
    /// error. JSON mode prints the reply envelope; a failed reply still exits
    /// with an error.
    pub fn emit<T, F>(&self, result: BusinessResult<T>, render: F) -> Result<()>
    where
        T: Serialize,
        F: FnOnce(&T),
    {
        if self.json {
            let failed = result.as_ref().err().map(|e| e.to_string());
            let reply = ServiceReply::from(result);
            println!("{}", serde_json::to_string_pretty(&reply)?);
            return match failed {
                Some(message) => Err(anyhow::anyhow!(message)),
                None => Ok(()),
            };
        }

        let value = result?;
        render(&value);
        Ok(())
    }
}
