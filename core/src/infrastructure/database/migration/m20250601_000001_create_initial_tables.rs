//! Initial migration to create all tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table with hybrid ID system
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Users::Uuid).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Users::ExternalId).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        // Create folders table; parent_id is a self-referential FK forming the tree
        manager
            .create_table(
                Table::create()
                    .table(Folders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Folders::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Folders::Uuid).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Folders::UserId).integer().not_null())
                    .col(ColumnDef::new(Folders::ParentId).integer())
                    .col(ColumnDef::new(Folders::Name).string().not_null())
                    .col(ColumnDef::new(Folders::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Folders::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Folders::Table, Folders::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Folders::Table, Folders::ParentId)
                            .to(Folders::Table, Folders::Id)
                            // Subtree removal is an explicit operation (blob
                            // cleanup must interleave), so no DB-level cascade
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create notes table
        manager
            .create_table(
                Table::create()
                    .table(Notes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Notes::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Notes::Uuid).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Notes::UserId).integer().not_null())
                    .col(ColumnDef::new(Notes::FolderId).integer().not_null())
                    .col(ColumnDef::new(Notes::Title).string().not_null())
                    .col(ColumnDef::new(Notes::BlobKey).string().not_null())
                    .col(ColumnDef::new(Notes::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Notes::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notes::Table, Notes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notes::Table, Notes::FolderId)
                            .to(Folders::Table, Folders::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create whiteboards table
        manager
            .create_table(
                Table::create()
                    .table(Whiteboards::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Whiteboards::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Whiteboards::Uuid).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Whiteboards::UserId).integer().not_null())
                    .col(ColumnDef::new(Whiteboards::FolderId).integer().not_null())
                    .col(ColumnDef::new(Whiteboards::Title).string().not_null())
                    .col(ColumnDef::new(Whiteboards::BlobKey).string().not_null())
                    .col(ColumnDef::new(Whiteboards::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Whiteboards::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Whiteboards::Table, Whiteboards::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Whiteboards::Table, Whiteboards::FolderId)
                            .to(Folders::Table, Folders::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create files table
        manager
            .create_table(
                Table::create()
                    .table(Files::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Files::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Files::Uuid).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Files::UserId).integer().not_null())
                    .col(ColumnDef::new(Files::FolderId).integer().not_null())
                    .col(ColumnDef::new(Files::FileName).string().not_null())
                    .col(ColumnDef::new(Files::MimeType).string().not_null())
                    .col(ColumnDef::new(Files::SizeBytes).big_integer().not_null())
                    .col(ColumnDef::new(Files::BlobKey).string().not_null())
                    .col(ColumnDef::new(Files::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Files::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Files::Table, Files::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Files::Table, Files::FolderId)
                            .to(Folders::Table, Folders::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create flashcard_groups table
        manager
            .create_table(
                Table::create()
                    .table(FlashcardGroups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FlashcardGroups::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(FlashcardGroups::Uuid).uuid().not_null().unique_key())
                    .col(ColumnDef::new(FlashcardGroups::UserId).integer().not_null())
                    .col(ColumnDef::new(FlashcardGroups::FolderId).integer().not_null())
                    .col(ColumnDef::new(FlashcardGroups::Name).string().not_null())
                    .col(ColumnDef::new(FlashcardGroups::BlobKey).string().not_null())
                    .col(ColumnDef::new(FlashcardGroups::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(FlashcardGroups::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(FlashcardGroups::Table, FlashcardGroups::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FlashcardGroups::Table, FlashcardGroups::FolderId)
                            .to(Folders::Table, Folders::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create flashcards table, cascade-deleted with their group
        manager
            .create_table(
                Table::create()
                    .table(Flashcards::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Flashcards::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Flashcards::Uuid).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Flashcards::GroupId).integer().not_null())
                    .col(ColumnDef::new(Flashcards::Term).text().not_null())
                    .col(ColumnDef::new(Flashcards::Explanation).text().not_null())
                    .col(ColumnDef::new(Flashcards::Position).integer().not_null().default(0))
                    .col(ColumnDef::new(Flashcards::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Flashcards::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Flashcards::Table, Flashcards::GroupId)
                            .to(FlashcardGroups::Table, FlashcardGroups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for folder-scoped listings
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_folders_user_parent")
                    .table(Folders::Table)
                    .col(Folders::UserId)
                    .col(Folders::ParentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Flashcards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FlashcardGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Files::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Whiteboards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Folders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Uuid,
    ExternalId,
    Email,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Folders {
    Table,
    Id,
    Uuid,
    UserId,
    ParentId,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Notes {
    Table,
    Id,
    Uuid,
    UserId,
    FolderId,
    Title,
    BlobKey,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Whiteboards {
    Table,
    Id,
    Uuid,
    UserId,
    FolderId,
    Title,
    BlobKey,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Files {
    Table,
    Id,
    Uuid,
    UserId,
    FolderId,
    FileName,
    MimeType,
    SizeBytes,
    BlobKey,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum FlashcardGroups {
    Table,
    Id,
    Uuid,
    UserId,
    FolderId,
    Name,
    BlobKey,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Flashcards {
    Table,
    Id,
    Uuid,
    GroupId,
    Term,
    Explanation,
    Position,
    CreatedAt,
    UpdatedAt,
}
