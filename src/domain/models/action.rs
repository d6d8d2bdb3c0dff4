use super::Command;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Full widget text, tagged with the document generation it was typed
    /// into.
    EditorChanged(String, u64),
    Command(Command),
}
