mod collection;
mod record;

pub use collection::{create, list};
pub use record::{record_delete, record_get, record_update};
