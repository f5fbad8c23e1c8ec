use std::env;
use std::error::Error;
use std::fs;

use espwizard_assist::{has_fence_artifact, strip_code_fences, AssistClient};
use inquire::Text;
use log::warn;
use tokio::runtime::Runtime;

use super::assist::API_KEY_VAR;

pub fn run(file: &str, error_message: Option<&String>) -> Result<(), Box<dyn Error>> {
    let mut current_yaml = fs::read_to_string(file)?;

    // Leftover markdown fences would confuse the firmware validator and the
    // model alike.
    if has_fence_artifact(&current_yaml) {
        warn!("{} contains markdown fence artifacts, stripping them", file);
        current_yaml = strip_code_fences(&current_yaml);
    }

    let error_message = match error_message {
        Some(message) => message.clone(),
        None => Text::new("Paste the validator error message:").prompt()?,
    };

    let Ok(api_key) = env::var(API_KEY_VAR) else {
        warn!("{} is not set", API_KEY_VAR);
        println!(
            "{}",
            espwizard_assist::AssistError::Auth.to_comment_block()
        );
        return Ok(());
    };

    let rt = Runtime::new()?;
    let result = rt.block_on(async {
        let client = AssistClient::new(api_key);
        client.fix(&current_yaml, &error_message).await
    });

    match result {
        Ok(yaml) => {
            fs::write(file, &yaml)?;
            println!("Wrote repaired configuration to {}", file);
        }
        Err(e) => {
            // The broken document stays untouched; the diagnosis goes to the
            // console instead.
            warn!("Fix request failed: {}", e);
            println!("{}", e.to_comment_block());
        }
    }
    Ok(())
}
