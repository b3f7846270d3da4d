use serde::Serialize;

pub const DEFAULT_PROVIDER: &str = "smtp";

/// Delivery backend selected in the form. Matching is exact: the select only
/// ever posts the lower-case option values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MailProvider {
  Smtp,
  AwsSes,
}

impl MailProvider {
  pub fn from_name(name: Option<&str>) -> Self {
    match name.unwrap_or(DEFAULT_PROVIDER) {
      "aws-ses" | "ses" => MailProvider::AwsSes,
      _ => MailProvider::Smtp,
    }
  }
}

/// A container of provider specific fields in the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderGroup {
  Smtp,
  AwsSes,
}

impl ProviderGroup {
  pub const ALL: [ProviderGroup; 2] = [ProviderGroup::Smtp, ProviderGroup::AwsSes];

  pub fn element_id(&self) -> &'static str {
    match self {
      ProviderGroup::Smtp => "smtp-config",
      ProviderGroup::AwsSes => "aws-ses-config",
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderVisibility {
  Hidden,
  Smtp,
  AwsSes,
}

impl ProviderVisibility {
  pub fn is_visible(&self, group: ProviderGroup) -> bool {
    matches!(
      (self, group),
      (ProviderVisibility::Smtp, ProviderGroup::Smtp)
        | (ProviderVisibility::AwsSes, ProviderGroup::AwsSes)
    )
  }
}

pub fn compute_visibility(mail: bool, provider: Option<&str>) -> ProviderVisibility {
  if !mail {
    return ProviderVisibility::Hidden;
  }
  match MailProvider::from_name(provider) {
    MailProvider::AwsSes => ProviderVisibility::AwsSes,
    MailProvider::Smtp => ProviderVisibility::Smtp,
  }
}
