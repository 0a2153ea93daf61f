use jiff::Timestamp;

/// One user id bound to a key.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Identity {
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,

    pub email: String,

    #[serde(with = "crate::timestamp::required")]
    pub created_at: Timestamp,

    #[serde(default, with = "crate::timestamp::optional")]
    pub expires_at: Option<Timestamp>,
}

/// The zero identity, returned when a key has no user id at all.
impl Default for Identity {
    fn default() -> Self {
        Self {
            name: String::new(),
            comment: String::new(),
            email: String::new(),
            created_at: Timestamp::UNIX_EPOCH,
            expires_at: None,
        }
    }
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            created_at,
            ..Default::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_expiration(mut self, timestamp: i64) -> Result<Self, crate::TimestampError> {
        self.expires_at = Some(crate::timestamp::parse_timestamp(timestamp)?);
        Ok(self)
    }

    /// Display identifier: `Name (Comment) <email>`
    pub fn id(&self) -> String {
        let mut id = self.name.clone();
        if !self.comment.is_empty() {
            id.push_str(&format!(" ({})", self.comment));
        }
        id.push_str(&format!(" <{}>", self.email));
        id
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "uid                            {}", self.id())?;
        if let Some(expires_at) = self.expires_at {
            write!(f, " [expires: {}]", crate::timestamp::format_day(expires_at))?;
        }
        Ok(())
    }
}
