use rocket::{
    http::{Cookie, SameSite},
    request::{FromRequest, Outcome},
    Request,
};
use serde::{Deserialize, Serialize};

pub const VOTER_ID_COOKIE: &str = "voter_id";

/// An opaque client-correlation token, held by the browser in a cookie and
/// echoed into every vote event. Not an authentication credential: it is
/// never validated, only carried through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoterId(String);

impl VoterId {
    /// Generate a fresh token: 64 bits of randomness as lowercase hex,
    /// enough to avoid collisions across concurrent voters.
    pub fn generate() -> Self {
        Self(format!("{:016x}", rand::random::<u64>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Truncated form used in logs.
    pub fn prefix(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }

    /// Serialize this token into a cookie. No explicit expiry or path; the
    /// browser keeps it under its default policy.
    pub fn into_cookie(self) -> Cookie<'static> {
        Cookie::build(VOTER_ID_COOKIE, self.0)
            .same_site(SameSite::Lax)
            .finish()
    }
}

impl From<String> for VoterId {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Read the token from the incoming cookie, or issue a new one. Issuing adds
/// the cookie to the response jar, so the same client presents the same
/// token on every later request.
#[rocket::async_trait]
impl<'r> FromRequest<'r> for VoterId {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let cookies = req.cookies();
        match cookies.get(VOTER_ID_COOKIE) {
            Some(cookie) => Outcome::Success(Self(cookie.value().to_string())),
            None => {
                let voter_id = Self::generate();
                cookies.add(voter_id.clone().into_cookie());
                Outcome::Success(voter_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_hex_and_distinct() {
        let first = VoterId::generate();
        let second = VoterId::generate();

        for token in [&first, &second] {
            assert_eq!(16, token.as_str().len());
            assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        }
        assert_ne!(first, second);
    }

    #[test]
    fn cookie_carries_the_token() {
        let cookie = VoterId::from("deadbeefdeadbeef".to_string()).into_cookie();
        assert_eq!(VOTER_ID_COOKIE, cookie.name());
        assert_eq!("deadbeefdeadbeef", cookie.value());
    }

    #[test]
    fn prefix_is_bounded() {
        assert_eq!("deadbeef", VoterId::from("deadbeefdeadbeef".to_string()).prefix());
        assert_eq!("abc", VoterId::from("abc".to_string()).prefix());
    }
}
