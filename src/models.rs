use serde::{Deserialize, Serialize};

/// Posted by the `#mail` checkbox. Browsers only send the field when checked.
#[derive(Default, Serialize, Deserialize)]
pub struct WebApiToggleMailRequest {
  pub mail: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct WebApiChangeProviderRequest {
  #[serde(rename = "mail-provider")]
  pub mail_provider: String,
}

#[derive(Serialize, Deserialize)]
pub struct WebApiTestMailRequest {
  pub to: String,
}
