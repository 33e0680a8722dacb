//! Known-weak password list.

/// Passwords flagged as common.  Matching is exact after lowercasing
/// and trimming the candidate, so every entry here is lowercase.
pub const COMMON_PASSWORDS: &[&str] = &[
    "123456",
    "password",
    "12345678",
    "qwerty",
    "123456789",
    "12345",
    "1234",
    "111111",
    "1234567",
    "dragon",
    "123123",
    "baseball",
    "abc123",
    "football",
    "monkey",
    "letmein",
    "696969",
    "shadow",
    "master",
    "666666",
    "qwertyuiop",
    "123321",
    "mustang",
    "1234567890",
];

/// Whether `password` is on the common-password list.
///
/// An absent or empty password is not "common"; absence is reported by
/// its own check.
pub fn is_common_password(password: Option<&str>) -> bool {
    let Some(pw) = password.filter(|p| !p.is_empty()) else {
        return false;
    };

    let normalized = pw.trim().to_lowercase();
    COMMON_PASSWORDS.contains(&normalized.as_str())
}
