mod content;
mod ids;
mod note;

pub use content::{Content, ContentFormat};
pub use ids::{NoteId, TagId};
pub use note::{Note, NoteBuilder};
