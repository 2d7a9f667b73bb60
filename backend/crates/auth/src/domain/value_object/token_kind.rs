use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Purpose tag for a verification token.
///
/// At most one live token exists per (email, kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[repr(i16)]
pub enum TokenKind {
    #[display("PASSWORD_RESET")]
    PasswordReset = 0,
    #[display("OTP_VERIFICATION")]
    OtpVerification = 1,
}

impl TokenKind {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(TokenKind::PasswordReset),
            1 => Some(TokenKind::OtpVerification),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_id_roundtrip() {
        assert_eq!(TokenKind::from_id(TokenKind::PasswordReset.id()), Some(TokenKind::PasswordReset));
        assert_eq!(
            TokenKind::from_id(TokenKind::OtpVerification.id()),
            Some(TokenKind::OtpVerification)
        );
        assert_eq!(TokenKind::from_id(7), None);
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::PasswordReset.to_string(), "PASSWORD_RESET");
        assert_eq!(TokenKind::OtpVerification.to_string(), "OTP_VERIFICATION");
    }
}
