use anyhow::Result;
use dialoguer::Input;

use crate::chat::{ChatMessage, ChatSession, Gateway, Role};
use crate::config::Config;

fn print_message(message: &ChatMessage) {
    let who = match message.role {
        Role::User => "you",
        Role::Assistant => "bot",
    };
    println!("[{}] {}: {}", message.timestamp.format("%H:%M:%S"), who, message.content);
}

pub async fn cmd_chat(config: &Config, message: Option<&str>) -> Result<()> {
    let gateway = Gateway::from_config(&config.chat);
    let mut session = ChatSession::new();

    if let Some(text) = message {
        if let Some(reply) = session.send(&gateway, text).await {
            println!("{}", reply.content);
        }
        return Ok(());
    }

    println!("Chatting via {}. Empty line or /quit to leave.", gateway.describe());
    loop {
        let line: String = Input::new()
            .with_prompt("you")
            .allow_empty(true)
            .interact_text()?;

        let text = line.trim();
        if text.is_empty() || text == "/quit" {
            break;
        }

        if let Some(reply) = session.send(&gateway, text).await {
            print_message(reply);
        }
    }

    tracing::debug!(messages = session.messages().len(), "chat session closed");
    Ok(())
}
