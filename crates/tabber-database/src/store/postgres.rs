//! PostgreSQL tree store.
//!
//! Child sets are not stored on the parent row; they are the rows whose
//! `parent_id`/`folder_id` points at it. Every mutation that touches a
//! sibling namespace first takes a row lock on the parent folder, so creates
//! and renames under the same parent serialize and the name check is
//! re-done inside the committing transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use tabber_core::error::{AppError, ErrorKind};
use tabber_core::result::AppResult;
use tabber_core::types::{ConversationId, FolderId, UserId};
use tabber_entity::folder::ROOT_FOLDER_NAME;
use tabber_entity::{
    Conversation, CreateConversation, CreateFolder, CreateUser, Folder, Message, NodeRef,
    StoreDump, User,
};

use super::TreeStore;

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    root_folder_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id.into(),
            email: row.email,
            password_hash: row.password_hash,
            root_folder_id: row.root_folder_id.into(),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct FolderRow {
    id: Uuid,
    name: String,
    parent_id: Option<Uuid>,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl FolderRow {
    fn into_folder(self, children: Vec<FolderId>, conversations: Vec<ConversationId>) -> Folder {
        Folder {
            id: self.id.into(),
            name: self.name,
            parent_id: self.parent_id.map(FolderId::from),
            owner_id: self.owner_id.into(),
            children,
            conversations,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ConversationRow {
    id: Uuid,
    name: String,
    folder_id: Uuid,
    messages: Json<Vec<Message>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ConversationRow> for Conversation {
    fn from(row: ConversationRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
            folder_id: row.folder_id.into(),
            messages: row.messages.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Maps a sqlx error, turning unique violations into `conflict_kind`.
fn map_write_error(
    err: sqlx::Error,
    conflict_kind: ErrorKind,
    conflict_message: String,
    context: &'static str,
) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::new(conflict_kind, conflict_message)
        }
        _ => AppError::with_source(ErrorKind::Database, context, err),
    }
}

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

/// Tree store persisted in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgTreeStore {
    pool: PgPool,
}

impl PgTreeStore {
    /// Create a new store over a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_folder(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Folder>> {
        let Some(row) = sqlx::query_as::<_, FolderRow>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_error("Failed to find folder"))?
        else {
            return Ok(None);
        };

        let children: Vec<Uuid> = sqlx::query_scalar(
            "SELECT id FROM folders WHERE parent_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error("Failed to list child folders"))?;

        let conversations: Vec<Uuid> = sqlx::query_scalar(
            "SELECT id FROM conversations WHERE folder_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error("Failed to list conversations"))?;

        Ok(Some(row.into_folder(
            children.into_iter().map(FolderId::from).collect(),
            conversations.into_iter().map(ConversationId::from).collect(),
        )))
    }

    /// Lock a folder row for the rest of the transaction.
    async fn lock_folder(conn: &mut PgConnection, id: Uuid) -> AppResult<FolderRow> {
        sqlx::query_as::<_, FolderRow>("SELECT * FROM folders WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_error("Failed to lock folder"))?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    /// Whether any child of `parent` other than `exclude` is called `name`.
    async fn name_taken(
        conn: &mut PgConnection,
        parent: Uuid,
        name: &str,
        exclude: Option<Uuid>,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM folders WHERE parent_id = $1 AND name = $2 AND id <> $3) \
             OR EXISTS (SELECT 1 FROM conversations WHERE folder_id = $1 AND name = $2 AND id <> $3)",
        )
        .bind(parent)
        .bind(name)
        .bind(exclude.unwrap_or_else(Uuid::nil))
        .fetch_one(&mut *conn)
        .await
        .map_err(db_error("Failed to check sibling names"))
    }

    async fn touch_folder(conn: &mut PgConnection, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE folders SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(db_error("Failed to touch folder"))?;
        Ok(())
    }
}

#[async_trait]
impl TreeStore for PgTreeStore {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(User::from))
            .map_err(db_error("Failed to find user by email"))
    }

    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(id.into_uuid())
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(User::from))
            .map_err(db_error("Failed to find user"))
    }

    async fn insert_user(&self, data: &CreateUser) -> AppResult<User> {
        let user_id = Uuid::new_v4();
        let root_id = Uuid::new_v4();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        sqlx::query("INSERT INTO folders (id, name, parent_id, owner_id) VALUES ($1, $2, NULL, $3)")
            .bind(root_id)
            .bind(ROOT_FOLDER_NAME)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to create root folder"))?;

        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (id, email, password_hash, root_folder_id) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(user_id)
        .bind(data.email.to_lowercase())
        .bind(&data.password_hash)
        .bind(root_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                ErrorKind::EmailTaken,
                format!("Email '{}' is already registered", data.email),
                "Failed to create user",
            )
        })?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit user creation"))?;
        Ok(row.into())
    }

    async fn find_folder(&self, id: FolderId) -> AppResult<Option<Folder>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error("Failed to acquire connection"))?;
        Self::load_folder(&mut conn, id.into_uuid()).await
    }

    async fn find_conversation(&self, id: ConversationId) -> AppResult<Option<Conversation>> {
        sqlx::query_as::<_, ConversationRow>("SELECT * FROM conversations WHERE id = $1")
            .bind(id.into_uuid())
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Conversation::from))
            .map_err(db_error("Failed to find conversation"))
    }

    async fn find_child(&self, parent: FolderId, name: &str) -> AppResult<Option<NodeRef>> {
        let parent_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM folders WHERE id = $1)")
                .bind(parent.into_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to find folder"))?;
        if !parent_exists {
            return Err(AppError::not_found(format!("Folder {parent} not found")));
        }

        let hit = sqlx::query_as::<_, (Uuid, bool)>(
            "SELECT id, TRUE FROM folders WHERE parent_id = $1 AND name = $2 \
             UNION ALL \
             SELECT id, FALSE FROM conversations WHERE folder_id = $1 AND name = $2 \
             LIMIT 1",
        )
        .bind(parent.into_uuid())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to look up child"))?;

        Ok(hit.map(|(id, is_folder)| {
            if is_folder {
                NodeRef::Folder(id.into())
            } else {
                NodeRef::Conversation(id.into())
            }
        }))
    }

    async fn insert_folder(&self, data: &CreateFolder) -> AppResult<Folder> {
        let parent = data.parent_id.into_uuid();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        Self::lock_folder(&mut tx, parent).await?;
        if Self::name_taken(&mut tx, parent, &data.name, None).await? {
            return Err(AppError::already_exists(format!(
                "'{}' already exists in this folder",
                data.name
            )));
        }

        let row = sqlx::query_as::<_, FolderRow>(
            "INSERT INTO folders (id, name, parent_id, owner_id) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(parent)
        .bind(data.owner_id.into_uuid())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                ErrorKind::AlreadyExists,
                format!("'{}' already exists in this folder", data.name),
                "Failed to create folder",
            )
        })?;
        Self::touch_folder(&mut tx, parent).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit folder creation"))?;
        Ok(row.into_folder(Vec::new(), Vec::new()))
    }

    async fn insert_conversation(&self, data: &CreateConversation) -> AppResult<Conversation> {
        let parent = data.folder_id.into_uuid();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        Self::lock_folder(&mut tx, parent).await?;
        if Self::name_taken(&mut tx, parent, &data.name, None).await? {
            return Err(AppError::already_exists(format!(
                "'{}' already exists in this folder",
                data.name
            )));
        }

        let row = sqlx::query_as::<_, ConversationRow>(
            "INSERT INTO conversations (id, name, folder_id, messages) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(parent)
        .bind(Json(&data.messages))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                ErrorKind::AlreadyExists,
                format!("'{}' already exists in this folder", data.name),
                "Failed to create conversation",
            )
        })?;
        Self::touch_folder(&mut tx, parent).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit conversation creation"))?;
        Ok(row.into())
    }

    async fn rename_folder(&self, id: FolderId, new_name: &str) -> AppResult<Folder> {
        let id = id.into_uuid();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let target = Self::lock_folder(&mut tx, id).await?;
        let parent = target
            .parent_id
            .ok_or_else(|| AppError::forbidden("The root folder cannot be renamed"))?;
        Self::lock_folder(&mut tx, parent).await?;
        if Self::name_taken(&mut tx, parent, new_name, Some(id)).await? {
            return Err(AppError::already_exists(format!(
                "'{new_name}' already exists in this folder"
            )));
        }

        sqlx::query("UPDATE folders SET name = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(new_name)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                map_write_error(
                    e,
                    ErrorKind::AlreadyExists,
                    format!("'{new_name}' already exists in this folder"),
                    "Failed to rename folder",
                )
            })?;

        let folder = Self::load_folder(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        tx.commit()
            .await
            .map_err(db_error("Failed to commit folder rename"))?;
        Ok(folder)
    }

    async fn rename_conversation(
        &self,
        id: ConversationId,
        new_name: &str,
    ) -> AppResult<Conversation> {
        let id = id.into_uuid();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let folder_id: Uuid = sqlx::query_scalar("SELECT folder_id FROM conversations WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("Failed to find conversation"))?
            .ok_or_else(|| AppError::not_found(format!("Conversation {id} not found")))?;

        Self::lock_folder(&mut tx, folder_id).await?;
        if Self::name_taken(&mut tx, folder_id, new_name, Some(id)).await? {
            return Err(AppError::already_exists(format!(
                "'{new_name}' already exists in this folder"
            )));
        }

        let row = sqlx::query_as::<_, ConversationRow>(
            "UPDATE conversations SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(new_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                ErrorKind::AlreadyExists,
                format!("'{new_name}' already exists in this folder"),
                "Failed to rename conversation",
            )
        })?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit conversation rename"))?;
        Ok(row.into())
    }

    async fn append_messages(
        &self,
        id: ConversationId,
        messages: &[Message],
    ) -> AppResult<Conversation> {
        sqlx::query_as::<_, ConversationRow>(
            "UPDATE conversations SET messages = messages || $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id.into_uuid())
        .bind(Json(messages))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to append messages"))?
        .map(Conversation::from)
        .ok_or_else(|| AppError::not_found(format!("Conversation {id} not found")))
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<bool> {
        let id = id.into_uuid();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let target = match Self::lock_folder(&mut tx, id).await {
            Ok(row) => row,
            Err(e) if e.is(ErrorKind::NotFound) => return Ok(false),
            Err(e) => return Err(e),
        };
        let parent = target
            .parent_id
            .ok_or_else(|| AppError::forbidden("The root folder cannot be deleted"))?;
        Self::lock_folder(&mut tx, parent).await?;

        let populated: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM folders WHERE parent_id = $1) \
             OR EXISTS (SELECT 1 FROM conversations WHERE folder_id = $1)",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to check folder contents"))?;
        if populated {
            return Err(AppError::not_empty(format!(
                "Folder '{}' is not empty",
                target.name
            )));
        }

        sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete folder"))?;
        Self::touch_folder(&mut tx, parent).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit folder deletion"))?;
        Ok(true)
    }

    async fn delete_conversation(&self, id: ConversationId) -> AppResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let folder_id: Option<Uuid> =
            sqlx::query_scalar("DELETE FROM conversations WHERE id = $1 RETURNING folder_id")
                .bind(id.into_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("Failed to delete conversation"))?;

        let Some(folder_id) = folder_id else {
            return Ok(false);
        };
        Self::touch_folder(&mut tx, folder_id).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit conversation deletion"))?;
        Ok(true)
    }

    async fn dump(&self) -> AppResult<StoreDump> {
        let users = sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list users"))?;
        let folders =
            sqlx::query_as::<_, FolderRow>("SELECT * FROM folders ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("Failed to list folders"))?;
        let conversations = sqlx::query_as::<_, ConversationRow>(
            "SELECT * FROM conversations ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list conversations"))?;

        let mut children: HashMap<Uuid, Vec<FolderId>> = HashMap::new();
        for folder in &folders {
            if let Some(parent) = folder.parent_id {
                children.entry(parent).or_default().push(folder.id.into());
            }
        }
        let mut contained: HashMap<Uuid, Vec<ConversationId>> = HashMap::new();
        for conversation in &conversations {
            contained
                .entry(conversation.folder_id)
                .or_default()
                .push(conversation.id.into());
        }

        Ok(StoreDump {
            users: users.into_iter().map(User::from).collect(),
            folders: folders
                .into_iter()
                .map(|row| {
                    let kids = children.remove(&row.id).unwrap_or_default();
                    let convs = contained.remove(&row.id).unwrap_or_default();
                    row.into_folder(kids, convs)
                })
                .collect(),
            conversations: conversations.into_iter().map(Conversation::from).collect(),
        })
    }
}
