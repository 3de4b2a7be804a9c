use super::prompts::confirmer;
use super::render::users_table;
use super::ui::spin;
use super::{connect, index_from_position};
use crate::output::Output;
use crate::UsersCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movienight_config::Config;
use movienight_core::{NewUser, Outcome, RosterScreen};
use movienight_models::{UpdateUser, User, UserId};
use serde_json::json;

pub async fn run_users(config: &Config, cmd: UsersCommands, output: &Output) -> Result<()> {
    let screen = RosterScreen::new(connect(config)?);

    match cmd {
        UsersCommands::List => {
            let users = spin("Loading users...", output, screen.load()).await?;
            if users.is_empty() {
                output.warn("No users yet. Add one with 'movienight users add <name>'.");
            } else {
                output.render(|| users_table(&users), &json!({ "items": users }));
            }
            Ok(())
        }
        UsersCommands::Add { name, email, avatar_url } => {
            let user = NewUser {
                name,
                email: email.unwrap_or_default(),
                avatar_url: avatar_url.unwrap_or_default(),
            };
            let created = spin("Adding user...", output, screen.add_user(user)).await?;
            report_user(output, &created, "Added");
            Ok(())
        }
        UsersCommands::Edit { id, name, email, avatar_url } => {
            let update = UpdateUser { name, email, avatar_url };
            let updated = spin("Saving user...", output, screen.update_user(id, update)).await?;
            report_user(output, &updated, "Updated");
            Ok(())
        }
        UsersCommands::Remove { id, yes } => {
            let user = find_user(&screen, id).await?;
            match screen.remove_user(&user, confirmer(yes).as_ref()).await? {
                Outcome::Done(_) => output.success(format!("Removed {} from the rotation", user.name)),
                Outcome::Cancelled => output.info("Cancelled, nothing was removed."),
            }
            Ok(())
        }
        UsersCommands::Move { from, to } => {
            let mut editor = screen.editor().await?;
            let len = editor.users().len();
            editor.move_entry(index_from_position(from, len)?, index_from_position(to, len)?)?;
            save_order(&screen, &editor, output).await
        }
        UsersCommands::Reorder { ids } => {
            let mut editor = screen.editor().await?;
            editor.set_order(&ids)?;
            save_order(&screen, &editor, output).await
        }
        UsersCommands::Avatar { id, path } => {
            let updated = spin("Uploading avatar...", output, screen.upload_avatar(id, &path)).await?;
            report_user(output, &updated, "Updated avatar of");
            Ok(())
        }
    }
}

async fn find_user(screen: &RosterScreen, id: UserId) -> Result<User> {
    screen
        .load()
        .await?
        .into_iter()
        .find(|u| u.id == id)
        .ok_or_else(|| eyre!("No user with id {}", id))
}

async fn save_order(
    screen: &RosterScreen,
    editor: &movienight_core::RosterEditor,
    output: &Output,
) -> Result<()> {
    if !editor.is_dirty() {
        output.info("Order unchanged, nothing to save.");
        return Ok(());
    }
    spin("Saving order...", output, screen.save_order(editor)).await?;

    let users = screen.load().await?;
    output.success("Saved rotation order");
    output.render(|| users_table(&users), &json!({ "items": users }));
    Ok(())
}

fn report_user(output: &Output, user: &User, verb: &str) {
    if output.is_human() {
        output.success(format!("{} {} (id {})", verb, user.name, user.id));
    } else {
        output.json(&json!(user));
    }
}
