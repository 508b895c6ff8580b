/// Who is calling, as established by the auth adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Identity {
    pub(crate) profile_id: String,
    pub(crate) user_name: String,
}
