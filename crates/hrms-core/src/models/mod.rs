pub mod auth;
pub mod blob;
pub mod document;
pub mod envelope;
pub mod error;
pub mod event;
pub mod feedback;
pub mod identity;
pub mod item;
pub mod leave;
pub mod profile;
pub mod responses;
pub mod table;

pub use auth::*;
pub use blob::*;
pub use document::*;
pub use envelope::*;
pub use error::*;
pub use event::*;
pub use feedback::*;
pub use identity::*;
pub use item::*;
pub use leave::*;
pub use profile::*;
pub use responses::*;
pub use table::*;
