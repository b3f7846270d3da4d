mod record;
mod visibility;

pub use record::SettingsRecord;
pub use visibility::{
  compute_visibility, MailProvider, ProviderGroup, ProviderVisibility, DEFAULT_PROVIDER,
};
