//! Validation of raw user registration and update input.
//!
//! Create requests must carry every required field. Update requests merge on
//! non-blank values: an omitted, empty or whitespace-only field leaves the
//! stored value unchanged, so a field can never be cleared. A non-blank value
//! is held to the same rules as on create.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::ports::{CreateUserRequest, UpdateUserRequest};
use crate::domain::{
    EmailAddress, Gender, PersonName, UserDetails, UserDetailsPatch, UserField,
    UserValidationError,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn required(field: UserField, value: Option<String>) -> Result<String, UserValidationError> {
    value.ok_or(UserValidationError::MissingField(field))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn optional_name(
    field: UserField,
    value: Option<String>,
) -> Result<Option<PersonName>, UserValidationError> {
    non_blank(value)
        .map(|raw| PersonName::new(field, raw))
        .transpose()
}

fn parse_gender(value: &str) -> Result<Gender, UserValidationError> {
    if value.trim().is_empty() {
        return Err(UserValidationError::BlankField(UserField::Gender));
    }
    value.parse()
}

/// Parse a date of birth given as a calendar date or an RFC 3339 timestamp.
///
/// Timestamps keep their calendar date in UTC.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use registry::domain::parse_date_of_birth;
///
/// let parsed = parse_date_of_birth("2011-10-05T14:48:00.000Z").expect("valid");
/// assert_eq!(parsed, NaiveDate::from_ymd_opt(2011, 10, 5).expect("valid date"));
/// ```
pub fn parse_date_of_birth(value: &str) -> Result<NaiveDate, UserValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(UserValidationError::BlankField(UserField::DateOfBirth));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .or_else(|_| {
            DateTime::parse_from_rfc3339(value)
                .map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
        })
        .map_err(|_| UserValidationError::InvalidDateOfBirth)
}

/// Validate a create request into [`UserDetails`].
///
/// Fields are checked in declaration order and the first failure is
/// reported.
pub fn validate_new_user(request: CreateUserRequest) -> Result<UserDetails, UserValidationError> {
    let CreateUserRequest {
        first_name,
        last_name,
        other_names,
        email,
        date_of_birth,
        gender,
    } = request;

    let first_name = PersonName::new(
        UserField::FirstName,
        required(UserField::FirstName, first_name)?,
    )?;
    let last_name = PersonName::new(
        UserField::LastName,
        required(UserField::LastName, last_name)?,
    )?;
    let other_names = optional_name(UserField::OtherNames, other_names)?;
    let email = EmailAddress::new(required(UserField::Email, email)?)?;
    let date_of_birth = parse_date_of_birth(&required(UserField::DateOfBirth, date_of_birth)?)?;
    let gender = parse_gender(&required(UserField::Gender, gender)?)?;

    Ok(UserDetails {
        first_name,
        last_name,
        other_names,
        email,
        date_of_birth,
        gender,
    })
}

/// Validate an update request into a [`UserDetailsPatch`].
///
/// Blank values are dropped before validation, so only non-blank fields can
/// fail.
pub fn validate_user_patch(
    request: UpdateUserRequest,
) -> Result<UserDetailsPatch, UserValidationError> {
    let UpdateUserRequest {
        first_name,
        last_name,
        other_names,
        email,
        date_of_birth,
        gender,
    } = request;

    Ok(UserDetailsPatch {
        first_name: optional_name(UserField::FirstName, first_name)?,
        last_name: optional_name(UserField::LastName, last_name)?,
        other_names: optional_name(UserField::OtherNames, other_names)?,
        email: non_blank(email).map(EmailAddress::new).transpose()?,
        date_of_birth: non_blank(date_of_birth)
            .map(|raw| parse_date_of_birth(&raw))
            .transpose()?,
        gender: non_blank(gender).map(|raw| parse_gender(&raw)).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn base_request() -> CreateUserRequest {
        CreateUserRequest {
            first_name: Some("User 4".to_owned()),
            last_name: Some("Test".to_owned()),
            other_names: Some("Four".to_owned()),
            email: Some("user4@test.com".to_owned()),
            date_of_birth: Some("2011-10-05T14:48:00.000Z".to_owned()),
            gender: Some("MALE".to_owned()),
        }
    }

    #[fixture]
    fn create_request() -> CreateUserRequest {
        base_request()
    }

    #[rstest]
    fn accepts_complete_create_request(create_request: CreateUserRequest) {
        let details = validate_new_user(create_request).expect("valid request");
        assert_eq!(details.first_name.as_ref(), "User 4");
        assert_eq!(details.other_names.as_ref().map(AsRef::as_ref), Some("Four"));
        assert_eq!(details.email.as_ref(), "user4@test.com");
        assert_eq!(
            details.date_of_birth,
            NaiveDate::from_ymd_opt(2011, 10, 5).expect("valid date")
        );
        assert_eq!(details.gender, Gender::Male);
    }

    #[rstest]
    fn blank_other_names_are_absent(mut create_request: CreateUserRequest) {
        create_request.other_names = Some("  ".to_owned());
        let details = validate_new_user(create_request).expect("valid request");
        assert!(details.other_names.is_none());
    }

    #[rstest]
    fn future_dates_of_birth_are_accepted(mut create_request: CreateUserRequest) {
        create_request.date_of_birth = Some("2999-01-01".to_owned());
        let details = validate_new_user(create_request).expect("valid request");
        assert_eq!(
            details.date_of_birth,
            NaiveDate::from_ymd_opt(2999, 1, 1).expect("valid date")
        );
    }

    #[rstest]
    #[case::first_name(
        CreateUserRequest { first_name: None, ..base_request() },
        UserValidationError::MissingField(UserField::FirstName)
    )]
    #[case::last_name(
        CreateUserRequest { last_name: Some(String::new()), ..base_request() },
        UserValidationError::BlankField(UserField::LastName)
    )]
    #[case::email(
        CreateUserRequest { email: None, ..base_request() },
        UserValidationError::MissingField(UserField::Email)
    )]
    #[case::malformed_email(
        CreateUserRequest { email: Some("not-a-valid-email".to_owned()), ..base_request() },
        UserValidationError::InvalidEmail
    )]
    #[case::date_of_birth(
        CreateUserRequest { date_of_birth: None, ..base_request() },
        UserValidationError::MissingField(UserField::DateOfBirth)
    )]
    #[case::malformed_date(
        CreateUserRequest { date_of_birth: Some("05/10/2011".to_owned()), ..base_request() },
        UserValidationError::InvalidDateOfBirth
    )]
    #[case::gender(
        CreateUserRequest { gender: None, ..base_request() },
        UserValidationError::MissingField(UserField::Gender)
    )]
    #[case::unknown_gender(
        CreateUserRequest { gender: Some("UNKNOWN".to_owned()), ..base_request() },
        UserValidationError::UnknownGender
    )]
    fn rejects_invalid_create_requests(
        #[case] request: CreateUserRequest,
        #[case] expected: UserValidationError,
    ) {
        assert_eq!(validate_new_user(request), Err(expected));
    }

    #[rstest]
    fn empty_update_yields_empty_patch() {
        let patch = validate_user_patch(UpdateUserRequest::default()).expect("valid");
        assert!(patch.is_empty());
    }

    #[rstest]
    #[case::first_name(UpdateUserRequest { first_name: Some(" ".to_owned()), ..UpdateUserRequest::default() })]
    #[case::last_name(UpdateUserRequest { last_name: Some(String::new()), ..UpdateUserRequest::default() })]
    #[case::other_names(UpdateUserRequest { other_names: Some(String::new()), ..UpdateUserRequest::default() })]
    #[case::email(UpdateUserRequest { email: Some(String::new()), ..UpdateUserRequest::default() })]
    #[case::date_of_birth(UpdateUserRequest { date_of_birth: Some("  ".to_owned()), ..UpdateUserRequest::default() })]
    #[case::gender(UpdateUserRequest { gender: Some(String::new()), ..UpdateUserRequest::default() })]
    fn blank_update_fields_mean_no_change(#[case] request: UpdateUserRequest) {
        let patch = validate_user_patch(request).expect("blank fields are skipped");
        assert!(patch.is_empty());
    }

    #[rstest]
    fn blank_fields_are_skipped_alongside_changes() {
        let request = UpdateUserRequest {
            first_name: Some(String::new()),
            last_name: Some("Updated Test".to_owned()),
            ..UpdateUserRequest::default()
        };
        let patch = validate_user_patch(request).expect("valid");
        assert!(patch.first_name.is_none());
        assert_eq!(
            patch.last_name.as_ref().map(AsRef::as_ref),
            Some("Updated Test")
        );
    }

    #[rstest]
    #[case::malformed_email(
        UpdateUserRequest { email: Some("not-a-valid-email".to_owned()), ..UpdateUserRequest::default() },
        UserValidationError::InvalidEmail
    )]
    #[case::malformed_date(
        UpdateUserRequest { date_of_birth: Some("yesterday".to_owned()), ..UpdateUserRequest::default() },
        UserValidationError::InvalidDateOfBirth
    )]
    #[case::unknown_gender(
        UpdateUserRequest { gender: Some("female".to_owned()), ..UpdateUserRequest::default() },
        UserValidationError::UnknownGender
    )]
    fn rejects_malformed_update_fields(
        #[case] request: UpdateUserRequest,
        #[case] expected: UserValidationError,
    ) {
        assert_eq!(validate_user_patch(request), Err(expected));
    }

    #[rstest]
    #[case("2011-10-05")]
    #[case("2011-10-05T14:48:00.000Z")]
    #[case("  2011-10-05  ")]
    fn parses_supported_date_forms(#[case] raw: &str) {
        let expected = NaiveDate::from_ymd_opt(2011, 10, 5).expect("valid date");
        assert_eq!(parse_date_of_birth(raw), Ok(expected));
    }

    #[rstest]
    fn timestamps_keep_their_utc_calendar_date() {
        let expected = NaiveDate::from_ymd_opt(2011, 10, 6).expect("valid date");
        assert_eq!(parse_date_of_birth("2011-10-05T23:30:00-02:00"), Ok(expected));
    }
}
