use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub enum UserType {
    Bot,
    Organization,
    User,
}

#[derive(Clone, Debug, Deserialize)]
pub struct User {
    pub login: String,
    pub id: u64,
    pub html_url: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
}
