//! Sea-ORM entity definitions
//!
//! These map the domain models to database tables. All tables use the
//! hybrid ID system: an integer primary key for joins plus a uuid exposed
//! through the API.

pub mod file;
pub mod flashcard;
pub mod flashcard_group;
pub mod folder;
pub mod note;
pub mod user;
pub mod whiteboard;

// Re-export all entities
pub use file::Entity as File;
pub use flashcard::Entity as Flashcard;
pub use flashcard_group::Entity as FlashcardGroup;
pub use folder::Entity as Folder;
pub use note::Entity as Note;
pub use user::Entity as User;
pub use whiteboard::Entity as Whiteboard;

// Re-export active models for easy access
pub use file::ActiveModel as FileActive;
pub use flashcard::ActiveModel as FlashcardActive;
pub use flashcard_group::ActiveModel as FlashcardGroupActive;
pub use folder::ActiveModel as FolderActive;
pub use note::ActiveModel as NoteActive;
pub use user::ActiveModel as UserActive;
pub use whiteboard::ActiveModel as WhiteboardActive;
