#[derive(Clone, Debug, PartialEq, Eq, strum::Display)]
pub enum Notification {
    #[strum(serialize = "content:update")]
    ContentUpdate(String),
    #[strum(serialize = "status:update")]
    StatusUpdate(String),
    #[strum(serialize = "error")]
    Error(String),
    #[strum(serialize = "theme:update")]
    ThemeUpdate(bool),
    #[strum(serialize = "title:update")]
    TitleUpdate(String),
}
