pub mod config;
pub mod error;
pub mod provider;
pub mod sender;
pub mod ses;
pub mod smtp;

pub use config::{MailerSetting, ProviderKind};
pub use error::MailerError;
pub use provider::{parse_recipients, EmailProvider};
pub use sender::{notify_admin, provider_for, send, send_test_mail, MailTemplates, TestMailParam};
pub use ses::AwsSesEmailProvider;
pub use smtp::SmtpEmailProvider;
