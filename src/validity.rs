/// Validity the trust engine assigned to a key, from its one letter code.
///
/// Only [`Validity::Marginal`], [`Validity::Full`] and [`Validity::Ultimate`] are trusted
/// enough to encrypt to. Unknown codes are kept verbatim in [`Validity::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Validity {
    /// `o`: not yet computed
    New,
    /// `i`: invalid, e.g. missing self signature
    Invalid,
    /// `d`: disabled
    Disabled,
    /// `r`: revoked
    Revoked,
    /// `e`: expired
    Expired,
    /// `-`: unknown
    #[default]
    Unknown,
    /// `q`: undefined
    Undefined,
    /// `n`: never valid
    Never,
    /// `m`: marginally valid
    Marginal,
    /// `f`: fully valid
    Full,
    /// `u`: ultimately valid
    Ultimate,
    /// `w`: well known private part
    WellKnown,
    /// `s`: special
    Special,
    Other(String),
}

impl Validity {
    pub fn from_code(code: &str) -> Self {
        match code {
            "o" => Self::New,
            "i" => Self::Invalid,
            "d" => Self::Disabled,
            "r" => Self::Revoked,
            "e" => Self::Expired,
            "-" => Self::Unknown,
            "q" => Self::Undefined,
            "n" => Self::Never,
            "m" => Self::Marginal,
            "f" => Self::Full,
            "u" => Self::Ultimate,
            "w" => Self::WellKnown,
            "s" => Self::Special,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::New => "o",
            Self::Invalid => "i",
            Self::Disabled => "d",
            Self::Revoked => "r",
            Self::Expired => "e",
            Self::Unknown => "-",
            Self::Undefined => "q",
            Self::Never => "n",
            Self::Marginal => "m",
            Self::Full => "f",
            Self::Ultimate => "u",
            Self::WellKnown => "w",
            Self::Special => "s",
            Self::Other(code) => code,
        }
    }

    /// Marginal, full or ultimate, judged on the code so `Other("f")` counts as full
    pub fn is_trusted(&self) -> bool {
        matches!(self.code(), "m" | "f" | "u")
    }
}

impl From<&str> for Validity {
    fn from(value: &str) -> Self {
        Self::from_code(value)
    }
}

impl From<String> for Validity {
    fn from(value: String) -> Self {
        Self::from_code(&value)
    }
}

impl From<Validity> for String {
    fn from(value: Validity) -> Self {
        value.code().to_owned()
    }
}

impl std::fmt::Display for Validity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_marginal_full_and_ultimate_are_trusted() {
        for code in ["m", "f", "u"] {
            assert!(Validity::from_code(code).is_trusted(), "{code}");
        }
        for code in ["o", "i", "d", "r", "e", "-", "q", "n", "w", "s", "", "F", "mf"] {
            assert!(!Validity::from_code(code).is_trusted(), "{code}");
        }
    }

    #[test]
    fn trust_follows_the_code_not_the_variant() {
        for code in ["m", "f", "u"] {
            let validity = Validity::Other(code.into());
            assert!(validity.is_trusted(), "{code}");

            let json = serde_json::to_string(&validity).unwrap();
            let parsed: Validity = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed.is_trusted(), validity.is_trusted());
        }
        assert!(!Validity::Other("x".into()).is_trusted());
    }

    #[test]
    fn unknown_codes_are_preserved() {
        let validity = Validity::from_code("x");
        assert_eq!(validity, Validity::Other("x".into()));
        assert_eq!(validity.code(), "x");
        assert_eq!(Validity::from_code("").code(), "");
    }

    #[test]
    fn serialized_as_code() {
        let json = serde_json::to_string(&Validity::Full).unwrap();
        assert_eq!(json, r#""f""#);

        let validity: Validity = serde_json::from_str(r#""r""#).unwrap();
        assert_eq!(validity, Validity::Revoked);
    }
}
