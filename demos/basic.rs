//! Basic example walking the ClickUp hierarchy.
//!
//! Run with:
//! ```
//! CLICKUP_API_TOKEN=pk_your_token cargo run --example basic
//! ```

use clickapi::{Builder, ClickUpClient, Model};

#[tokio::main]
async fn main() -> clickapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating ClickUp client...");
    let client = ClickUpClient::from_env()?;
    println!("Connected to: {}", client.base_url());
    let clickup = Builder::for_client(client);

    if let Some(user) = clickup.user().await? {
        println!("Signed in as {}", user.get_str("username").unwrap_or_default());
    }

    // Teams (workspaces) visible to the token
    println!("\n--- Teams ---");
    let teams = clickup.teams()?.get().await?;
    println!("Found {} teams", teams.len());

    for team in &teams {
        println!("  - {} ({})", name(team), team.key().as_i64().unwrap_or_default());
    }

    let Some(mut team) = teams.into_first() else {
        return Ok(());
    };

    // Spaces of the first team, loaded through the relation
    println!("\n--- Spaces in {} ---", name(&team));
    let spaces = team.get_attribute("spaces").await?;
    let Some(space) = spaces.as_collection().and_then(|s| s.first()) else {
        return Ok(());
    };
    for space in spaces.as_collection().into_iter().flatten() {
        println!("  - {}", name(space));
    }

    // Folderless lists, then the open tasks of the first one
    let mut space = space.clone();
    let lists = space.get_attribute("lists").await?;
    let Some(mut list) = lists.as_collection().and_then(|l| l.first()).cloned() else {
        println!("\nNo folderless lists in {}", name(&space));
        return Ok(());
    };

    println!("\n--- Tasks in {} ---", name(&list));
    let tasks = list.get_attribute("tasks").await?;
    for task in tasks.as_collection().into_iter().flatten().take(10) {
        let status = task
            .attribute("status")
            .as_model()
            .and_then(|status| status.get_str("status"))
            .unwrap_or_default();
        let due = task
            .get_datetime("due_date")
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "no due date".to_string());
        println!("  - {} [{status}] {due}", name(task));
    }

    // Comments on the first task
    if let Some(mut task) = tasks.as_collection().and_then(|t| t.first()).cloned() {
        println!("\n--- Comments on {} ---", name(&task));
        let comments = task.get_attribute("comments").await?;
        for comment in comments.as_collection().into_iter().flatten() {
            let author = comment
                .attribute("user")
                .as_model()
                .and_then(|user| user.get_str("username"))
                .unwrap_or_default();
            println!(
                "  {author}: {}",
                comment.get_str("comment_text").unwrap_or_default()
            );
        }
    }

    Ok(())
}

fn name(model: &Model) -> String {
    model.get_str("name").unwrap_or_default()
}
