use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::{AttributeValue, BlobReference, Item, ItemReader, StoreError};

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub user_id: String,
    pub document_id: String,
    pub file_name: String,
    pub file_type: String,
    /// Size in bytes.
    pub file_size: i64,
    pub upload_date: String,
    pub s3_key: String,
    pub s3_bucket: String,
    pub download_url: String,
}

impl DocumentMetadata {
    pub fn to_item(&self) -> Item {
        Item::from([
            ("userId".to_string(), AttributeValue::string(&self.user_id)),
            (
                "documentId".to_string(),
                AttributeValue::string(&self.document_id),
            ),
            ("fileName".to_string(), AttributeValue::string(&self.file_name)),
            ("fileType".to_string(), AttributeValue::string(&self.file_type)),
            ("fileSize".to_string(), AttributeValue::number(self.file_size)),
            (
                "uploadDate".to_string(),
                AttributeValue::string(&self.upload_date),
            ),
            ("s3Key".to_string(), AttributeValue::string(&self.s3_key)),
            ("s3Bucket".to_string(), AttributeValue::string(&self.s3_bucket)),
            (
                "downloadUrl".to_string(),
                AttributeValue::string(&self.download_url),
            ),
        ])
    }

    pub fn from_item(item: &Item) -> Result<Self, StoreError> {
        let reader = ItemReader::new(item);
        Ok(Self {
            user_id: reader.string("userId")?,
            document_id: reader.string("documentId")?,
            file_name: reader.string("fileName")?,
            file_type: reader.string("fileType")?,
            file_size: reader.integer("fileSize")?,
            upload_date: reader.string("uploadDate")?,
            s3_key: reader.string("s3Key")?,
            s3_bucket: reader.string("s3Bucket")?,
            download_url: reader.string("downloadUrl")?,
        })
    }
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpload {
    pub file_name: String,
    pub file_type: String,
    /// Size in bytes, as a JSON integer or a string of digits.
    #[serde(deserialize_with = "integer_or_digits")]
    pub file_size: i64,
    pub upload_date: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SizeField {
    Integer(i64),
    Text(String),
}

fn integer_or_digits<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match SizeField::deserialize(deserializer)? {
        SizeField::Integer(size) => Ok(size),
        SizeField::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("fileSize `{text}` is not an integer"))),
    }
}

impl DocumentUpload {
    pub fn into_metadata(
        self,
        user_id: impl Into<String>,
        document_id: impl Into<String>,
        blob: BlobReference,
    ) -> DocumentMetadata {
        DocumentMetadata {
            user_id: user_id.into(),
            document_id: document_id.into(),
            file_name: self.file_name,
            file_type: self.file_type,
            file_size: self.file_size,
            upload_date: self.upload_date,
            s3_key: blob.key,
            s3_bucket: blob.bucket,
            download_url: blob.url,
        }
    }
}
