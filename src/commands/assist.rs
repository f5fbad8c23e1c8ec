use std::env;
use std::error::Error;
use std::fs;

use espwizard_assist::AssistClient;
use inquire::Text;
use log::warn;
use tokio::runtime::Runtime;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

pub fn run(
    prompt: Option<&String>,
    context_path: Option<&String>,
    output: &str,
    to_stdout: bool,
) -> Result<(), Box<dyn Error>> {
    let prompt = match prompt {
        Some(prompt) => prompt.clone(),
        None => Text::new("What should the device do?").prompt()?,
    };

    let context = match context_path {
        Some(path) => Some(fs::read_to_string(path)?),
        None => None,
    };

    let Ok(api_key) = env::var(API_KEY_VAR) else {
        // Surface the failure as a commented pseudo-document, like every other
        // assist error, so there is always displayable output.
        warn!("{} is not set", API_KEY_VAR);
        let comment = espwizard_assist::AssistError::Auth.to_comment_block();
        return super::write_output(&comment, output, to_stdout);
    };

    let rt = Runtime::new()?;
    let yaml = rt.block_on(async {
        let client = AssistClient::new(api_key);
        match client.generate(&prompt, context.as_deref()).await {
            Ok(yaml) => yaml,
            Err(e) => {
                warn!("Assist request failed: {}", e);
                e.to_comment_block()
            }
        }
    });

    super::write_output(&yaml, output, to_stdout)
}
