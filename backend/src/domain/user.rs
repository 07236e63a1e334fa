//! Registered user record and its value types.
//!
//! Values are validated on construction so a [`User`] held by the registry
//! always satisfies the field rules: non-blank names, a syntactically valid
//! email address, a calendar date of birth and a known gender.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use uuid::Uuid;

/// Field names as exposed to clients, used to label validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    FirstName,
    LastName,
    OtherNames,
    Email,
    DateOfBirth,
    Gender,
}

impl UserField {
    /// Client-facing (camelCase) field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::OtherNames => "otherNames",
            Self::Email => "email",
            Self::DateOfBirth => "dateOfBirth",
            Self::Gender => "gender",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors raised while building user values from raw input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("missing required field: {0}")]
    MissingField(UserField),
    #[error("{0} must not be empty")]
    BlankField(UserField),
    #[error("email must be a valid email address")]
    InvalidEmail,
    #[error("dateOfBirth must be a calendar date (YYYY-MM-DD) or an RFC 3339 timestamp")]
    InvalidDateOfBirth,
    #[error("gender must be one of MALE, FEMALE or OTHERS")]
    UnknownGender,
    #[error("user id must be a valid UUID")]
    InvalidId,
}

impl UserValidationError {
    /// Field the failure refers to, if any.
    pub fn field(&self) -> Option<UserField> {
        match self {
            Self::MissingField(field) | Self::BlankField(field) => Some(*field),
            Self::InvalidEmail => Some(UserField::Email),
            Self::InvalidDateOfBirth => Some(UserField::DateOfBirth),
            Self::UnknownGender => Some(UserField::Gender),
            Self::InvalidId => None,
        }
    }

    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::BlankField(_) => "blank_field",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidDateOfBirth => "invalid_date",
            Self::UnknownGender => "invalid_gender",
            Self::InvalidId => "invalid_id",
        }
    }
}

/// Stable user identifier stored as a UUID.
///
/// Identifiers are generated by the registry on creation and never accepted
/// from clients for writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its canonical string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A first, last or other name. Never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Validate a name for `field`, rejecting blank input.
    pub fn new(field: UserField, value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(UserValidationError::BlankField(field));
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Syntactically valid email address, compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One `@`, no whitespace, and a dot-separated domain with a non-empty
        // final label.
        let pattern = r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// # Examples
    /// ```
    /// use registry::domain::EmailAddress;
    ///
    /// assert!(EmailAddress::new("user4@test.com").is_ok());
    /// assert!(EmailAddress::new("not-a-valid-email").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(UserValidationError::BlankField(UserField::Email));
        }
        if !email_regex().is_match(&value) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Fixed gender enumeration. Names match exactly, upper case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Others,
}

impl Gender {
    /// Canonical enumeration name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Others => "OTHERS",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "MALE" => Ok(Self::Male),
            "FEMALE" => Ok(Self::Female),
            "OTHERS" => Ok(Self::Others),
            _ => Err(UserValidationError::UnknownGender),
        }
    }
}

/// Validated, client-editable user fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub other_names: Option<PersonName>,
    pub email: EmailAddress,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
}

/// Validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDetailsPatch {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub other_names: Option<PersonName>,
    pub email: Option<EmailAddress>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
}

impl UserDetailsPatch {
    /// Whether applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Registered user.
///
/// ## Invariants
/// - `id` and `sequence_number` are assigned once, at creation, and never
///   change afterwards.
/// - All [`UserDetails`] invariants hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    sequence_number: u64,
    details: UserDetails,
}

impl User {
    /// Build a user from a freshly assigned identity and validated details.
    pub fn new(id: UserId, sequence_number: u64, details: UserDetails) -> Self {
        Self {
            id,
            sequence_number,
            details,
        }
    }

    /// Merge `patch` into this user, keeping identity untouched.
    pub fn apply(self, patch: UserDetailsPatch) -> Self {
        let Self {
            id,
            sequence_number,
            details,
        } = self;
        let UserDetailsPatch {
            first_name,
            last_name,
            other_names,
            email,
            date_of_birth,
            gender,
        } = patch;

        Self {
            id,
            sequence_number,
            details: UserDetails {
                first_name: first_name.unwrap_or(details.first_name),
                last_name: last_name.unwrap_or(details.last_name),
                other_names: other_names.or(details.other_names),
                email: email.unwrap_or(details.email),
                date_of_birth: date_of_birth.unwrap_or(details.date_of_birth),
                gender: gender.unwrap_or(details.gender),
            },
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Position assigned at creation (`count-at-creation + 1`).
    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    /// Validated user fields.
    pub fn details(&self) -> &UserDetails {
        &self.details
    }

    /// Given name.
    pub fn first_name(&self) -> &PersonName {
        &self.details.first_name
    }

    /// Family name.
    pub fn last_name(&self) -> &PersonName {
        &self.details.last_name
    }

    /// Optional middle or other names.
    pub fn other_names(&self) -> Option<&PersonName> {
        self.details.other_names.as_ref()
    }

    /// Registered email address.
    pub fn email(&self) -> &EmailAddress {
        &self.details.email
    }

    /// Calendar date of birth.
    pub fn date_of_birth(&self) -> NaiveDate {
        self.details.date_of_birth
    }

    /// Recorded gender.
    pub fn gender(&self) -> Gender {
        self.details.gender
    }
}
