use super::Confirmer;
use crate::context::{AppContext, Mutation};
use crate::error::{Outcome, WorkflowError};
use crate::guard::MutationGuard;
use crate::reorder::reorder;
use movienight_client::AvatarFile;
use movienight_models::{Ack, CreateUser, ReorderUsers, UpdateUser, User, UserId};
use std::path::Path;
use tracing::info;

/// Input of the add-user form; blank optional fields are sent as null
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub avatar_url: String,
}

impl NewUser {
    pub fn into_request(self) -> Result<CreateUser, WorkflowError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(WorkflowError::EmptyName);
        }
        Ok(CreateUser {
            name,
            email: non_blank(self.email),
            avatar_url: non_blank(self.avatar_url),
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Local working copy of the rotation order. Moves only touch this copy;
/// nothing is sent until the complete order is saved.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEditor {
    original: Vec<UserId>,
    users: Vec<User>,
}

impl RosterEditor {
    pub fn new(users: Vec<User>) -> Self {
        let original = users.iter().map(|u| u.id).collect();
        Self { original, users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn order(&self) -> Vec<UserId> {
        self.users.iter().map(|u| u.id).collect()
    }

    pub fn is_dirty(&self) -> bool {
        self.order() != self.original
    }

    /// Apply a drag from index `from` to index `to`
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<(), WorkflowError> {
        let len = self.users.len();
        for index in [from, to] {
            if index >= len {
                return Err(WorkflowError::OutOfRange { index, len });
            }
        }
        self.users = reorder(&self.users, from, to);
        Ok(())
    }

    /// Replace the whole order at once. `order` must be a permutation of the
    /// current user ids.
    pub fn set_order(&mut self, order: &[UserId]) -> Result<(), WorkflowError> {
        let mut current = self.order();
        let mut wanted = order.to_vec();
        current.sort_unstable();
        wanted.sort_unstable();
        if current != wanted {
            return Err(WorkflowError::IncompleteOrder);
        }

        let mut reordered = Vec::with_capacity(self.users.len());
        for id in order {
            if let Some(user) = self.users.iter().find(|u| u.id == *id) {
                reordered.push(user.clone());
            }
        }
        self.users = reordered;
        Ok(())
    }
}

pub struct RosterScreen {
    ctx: AppContext,
    save: MutationGuard,
    add: MutationGuard,
    edit: MutationGuard,
    remove: MutationGuard,
}

impl RosterScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            save: MutationGuard::new("order save"),
            add: MutationGuard::new("user creation"),
            edit: MutationGuard::new("user update"),
            remove: MutationGuard::new("user removal"),
        }
    }

    pub async fn load(&self) -> Result<Vec<User>, WorkflowError> {
        self.ctx.users().await
    }

    pub async fn editor(&self) -> Result<RosterEditor, WorkflowError> {
        Ok(RosterEditor::new(self.load().await?))
    }

    pub fn is_saving(&self) -> bool {
        self.save.is_pending()
    }

    /// Send the complete order. Rejected while a previous save is in flight
    /// so an older order cannot land after a newer one.
    pub async fn save_order(&self, editor: &RosterEditor) -> Result<Ack, WorkflowError> {
        let _in_flight = self.save.try_begin()?;
        let request = ReorderUsers { order: editor.order() };

        let ack = self.ctx.api().reorder_users(&request).await?;
        self.ctx.invalidate_after(Mutation::ReorderUsers);

        info!(order = ?request.order, "Saved rotation order");
        Ok(ack)
    }

    pub async fn add_user(&self, user: NewUser) -> Result<User, WorkflowError> {
        let request = user.into_request()?;
        let _in_flight = self.add.try_begin()?;

        let created = self.ctx.api().create_user(&request).await?;
        self.ctx.invalidate_after(Mutation::CreateUser);

        info!(user_id = created.id, name = %created.name, "Added user");
        Ok(created)
    }

    pub async fn update_user(&self, id: UserId, update: UpdateUser) -> Result<User, WorkflowError> {
        if update.is_empty() {
            return Err(WorkflowError::EmptyUpdate);
        }
        let _in_flight = self.edit.try_begin()?;

        let updated = self.ctx.api().update_user(id, &update).await?;
        self.ctx.invalidate_after(Mutation::UpdateUser);

        info!(user_id = id, "Updated user");
        Ok(updated)
    }

    pub async fn remove_user(
        &self,
        user: &User,
        confirmer: &dyn Confirmer,
    ) -> Result<Outcome<Ack>, WorkflowError> {
        if !confirmer.confirm(&format!("Remove {} from the rotation?", user.name)) {
            return Ok(Outcome::Cancelled);
        }
        let _in_flight = self.remove.try_begin()?;

        let ack = self.ctx.api().delete_user(user.id).await?;
        self.ctx.invalidate_after(Mutation::DeleteUser);

        info!(user_id = user.id, name = %user.name, "Removed user");
        Ok(Outcome::Done(ack))
    }

    /// Upload an image and store the returned URL verbatim as the avatar
    pub async fn upload_avatar(&self, id: UserId, path: &Path) -> Result<User, WorkflowError> {
        let file = AvatarFile::from_path(path).await?;
        let upload = self.ctx.api().upload_avatar(file).await?;
        self.update_user(
            id,
            UpdateUser {
                avatar_url: Some(upload.url),
                ..Default::default()
            },
        )
        .await
    }
}
