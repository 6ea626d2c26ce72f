use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::{AttributeValue, Item, ItemReader, StoreError};

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: String,
    pub emp_id: String,
    pub name: String,
    pub email: String,
    pub department: String,
}

impl Profile {
    pub fn to_item(&self) -> Item {
        Item::from([
            ("userId".to_string(), AttributeValue::string(&self.user_id)),
            ("empId".to_string(), AttributeValue::string(&self.emp_id)),
            ("name".to_string(), AttributeValue::string(&self.name)),
            ("email".to_string(), AttributeValue::string(&self.email)),
            (
                "department".to_string(),
                AttributeValue::string(&self.department),
            ),
        ])
    }

    pub fn from_item(item: &Item) -> Result<Self, StoreError> {
        let reader = ItemReader::new(item);
        Ok(Self {
            user_id: reader.string("userId")?,
            emp_id: reader.string("empId")?,
            name: reader.string("name")?,
            email: reader.string("email")?,
            department: reader.string("department")?,
        })
    }
}

/// Profile fields supplied by the caller. Absent and `null` fields read as empty and fail
/// validation.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub emp_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub department: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ProfileUpdate {
    pub fn into_profile(self, user_id: impl Into<String>) -> Profile {
        Profile {
            user_id: user_id.into(),
            emp_id: self.emp_id,
            name: self.name,
            email: self.email,
            department: self.department,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_round_trip_preserves_fields() {
        let profile = ProfileUpdate {
            emp_id: "E-7".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            department: "Engineering".to_string(),
        }
        .into_profile("u1");

        let restored = Profile::from_item(&profile.to_item()).expect("profile");
        assert_eq!(restored, profile);
    }

    #[test]
    fn update_with_missing_field_fails_validation() {
        let update: ProfileUpdate = serde_json::from_value(json!({
            "empId": "E-7",
            "name": "Ada",
            "email": "ada@example.com"
        }))
        .expect("update");

        assert!(update.validate().is_err());
    }

    #[test]
    fn update_with_empty_field_fails_validation() {
        let update: ProfileUpdate = serde_json::from_value(json!({
            "empId": "E-7",
            "name": "",
            "email": "ada@example.com",
            "department": "Engineering"
        }))
        .expect("update");

        assert!(update.validate().is_err());
    }

    #[test]
    fn null_field_reads_as_empty_and_fails_validation() {
        let update: ProfileUpdate = serde_json::from_value(json!({
            "empId": null,
            "name": "Ada",
            "email": "ada@example.com",
            "department": "Engineering"
        }))
        .expect("null is accepted");

        assert_eq!(update.emp_id, "");
        assert!(update.validate().is_err());
    }

    #[test]
    fn non_string_field_is_still_rejected() {
        let result = serde_json::from_value::<ProfileUpdate>(json!({
            "empId": 7,
            "name": "Ada",
            "email": "ada@example.com",
            "department": "Engineering"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn profile_serializes_camel_case() {
        let profile = Profile {
            user_id: "u1".to_string(),
            emp_id: "E-7".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            department: "Engineering".to_string(),
        };

        let value = serde_json::to_value(&profile).expect("json");
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["empId"], "E-7");
    }
}
