use uuid::Uuid;

/// Length of a workspace invite code.
pub const INVITE_CODE_LEN: usize = 8;

/// Generate an invite code: the first eight hex digits of a random UUID.
pub fn generate_invite_code() -> String {
    let mut code = Uuid::new_v4().simple().to_string();
    code.truncate(INVITE_CODE_LEN);
    code
}
