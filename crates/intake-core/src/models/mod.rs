pub mod id;
pub mod options;
pub mod value;

pub use id::ItemId;
pub use options::OptionList;
pub use value::{DefaultValue, ValueKind};
